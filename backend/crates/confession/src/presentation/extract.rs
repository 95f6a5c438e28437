//! Request extractors whose rejections use the problem body

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Query};

use crate::error::ConfessionError;

/// `Json<T>` that rejects with [`ConfessionError::MalformedRequest`]
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ConfessionError))]
pub struct JsonBody<T>(pub T);

/// `Query<T>` that rejects with [`ConfessionError::MalformedRequest`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(ConfessionError))]
pub struct QueryParams<T>(pub T);
