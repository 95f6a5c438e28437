//! Confession Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::ConfessionConfig;
use crate::domain::gateway::{ModerationClient, UploadGateway};
use crate::domain::repository::BoardRepository;
use crate::infra::moderation::HttpModerationClient;
use crate::infra::postgres::PgConfessionRepository;
use crate::infra::upload_gateway::ProcessUploadGateway;
use crate::presentation::handlers::{self, ConfessionAppState};
use crate::presentation::middleware::resolve_caller;

/// Create the Confession router with the production collaborators
pub fn confession_router(
    repo: PgConfessionRepository,
    gateway: ProcessUploadGateway,
    moderation: HttpModerationClient,
    config: ConfessionConfig,
) -> Router {
    confession_router_generic(repo, gateway, moderation, config)
}

/// Create a generic Confession router for any repository and collaborators
///
/// All paths use `{id}` as the parameter name; on `GET /confessions/{id}` it
/// carries the upload transaction id, everywhere else the confession id.
pub fn confession_router_generic<R, G, M>(
    repo: R,
    gateway: G,
    moderation: M,
    config: ConfessionConfig,
) -> Router
where
    R: BoardRepository,
    G: UploadGateway + Sync + 'static,
    M: ModerationClient + Sync + 'static,
{
    let config = Arc::new(config);
    let state = ConfessionAppState {
        repo: Arc::new(repo),
        gateway: Arc::new(gateway),
        moderation: Arc::new(moderation),
        config: config.clone(),
    };

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/confessions", post(handlers::create_confession::<R, G, M>))
        .route("/confessions/public", get(handlers::public_feed::<R, G, M>))
        .route("/confessions/{id}", get(handlers::get_confession::<R, G, M>))
        .route("/confessions/{id}/vote", post(handlers::vote_confession::<R, G, M>))
        .route(
            "/confessions/{id}/replies",
            get(handlers::list_replies::<R, G, M>).post(handlers::create_reply::<R, G, M>),
        )
        .route("/confessions/{id}/review", post(handlers::review_moderation::<R, G, M>))
        .route("/replies/{id}/vote", post(handlers::vote_reply::<R, G, M>))
        .route("/search", post(handlers::search::<R, G, M>))
        .route("/trending", get(handlers::trending::<R, G, M>))
        .route("/tags/trending", get(handlers::trending_tags::<R, G, M>))
        .route("/analytics/stats", get(handlers::stats::<R, G, M>))
        .route("/irys/network-info", get(handlers::network_info::<R, G, M>))
        .route("/irys/balance", get(handlers::wallet_balance::<R, G, M>))
        .route("/irys/address", get(handlers::wallet_address::<R, G, M>))
        .layer(middleware::from_fn_with_state(config, resolve_caller))
        .with_state(state)
}
