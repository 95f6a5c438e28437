//! Caller Identity Middleware
//!
//! Resolves a [`CallerIdentity`] for every request and stores it in the
//! request extensions. Missing credentials mean anonymous; a credential that
//! fails verification is rejected with 401.

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::id::UserId;
use platform::client::{extract_bearer_token, extract_client_ip, extract_fingerprint};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::application::caller::CallerIdentity;
use crate::application::config::ConfessionConfig;
use crate::error::ConfessionError;

pub async fn resolve_caller(
    State(config): State<Arc<ConfessionConfig>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let headers = req.headers();

    let direct_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());

    let client_ip = extract_client_ip(headers, direct_ip);
    let fingerprint = extract_fingerprint(headers, client_ip);

    let user_id = match extract_bearer_token(headers) {
        None => None,
        Some(token) => match config.identity_key.verify(token) {
            Ok(uuid) => Some(UserId::from_uuid(uuid)),
            Err(e) => return ConfessionError::Unauthorized(e).into_response(),
        },
    };

    let caller = CallerIdentity::new(user_id, fingerprint.as_ref());
    if let Some(user_id) = caller.user_id {
        tracing::debug!(user_id = %user_id, "Authenticated caller");
    }
    req.extensions_mut().insert(caller);

    next.run(req).await
}
