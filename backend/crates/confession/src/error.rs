//! Confession Error Types
//!
//! Confession-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Moderation failures are deliberately
//! absent: they are absorbed inside the publish use case.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::identity::IdentityTokenError;
use thiserror::Error;

use crate::domain::gateway::UploadError;
use crate::domain::value_object::ValidationError;

/// Confession-specific result type alias
pub type ConfessionResult<T> = Result<T, ConfessionError>;

#[derive(Debug, Error)]
pub enum ConfessionError {
    /// Submitted input violates a constraint
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Body or query string could not be decoded
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Confession not found")]
    ConfessionNotFound,

    #[error("Reply not found")]
    ReplyNotFound,

    /// A vote from this voter already exists for the target
    #[error("You have already voted on this item")]
    DuplicateVote,

    /// Upload gateway rejected the payload, timed out, or misbehaved
    #[error("Upload to permanent storage failed: {0}")]
    Upload(#[from] UploadError),

    /// Presented identity token could not be verified
    #[error("Invalid identity token")]
    Unauthorized(#[from] IdentityTokenError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConfessionError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfessionError::Validation(_) | ConfessionError::MalformedRequest(_) => {
                ErrorKind::BadRequest
            }
            ConfessionError::ConfessionNotFound | ConfessionError::ReplyNotFound => {
                ErrorKind::NotFound
            }
            ConfessionError::DuplicateVote => ErrorKind::Conflict,
            ConfessionError::Upload(_) => ErrorKind::BadGateway,
            ConfessionError::Unauthorized(_) => ErrorKind::Unauthorized,
            ConfessionError::Database(_) | ConfessionError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures get a generic message so database details never
    /// reach the client.
    pub fn to_app_error(&self) -> AppError {
        match self {
            ConfessionError::Database(_) | ConfessionError::Internal(_) => {
                AppError::internal("An internal error occurred")
            }
            ConfessionError::Upload(_) => AppError::bad_gateway(self.to_string())
                .with_action("Retry the submission later"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ConfessionError::Database(e) => {
                tracing::error!(error = %e, "Confession database error");
            }
            ConfessionError::Internal(msg) => {
                tracing::error!(message = %msg, "Confession internal error");
            }
            ConfessionError::Upload(e) => {
                tracing::error!(error = %e, "Upload gateway failure");
            }
            ConfessionError::Unauthorized(e) => {
                tracing::warn!(error = %e, "Rejected identity token");
            }
            _ => {
                tracing::debug!(error = %self, "Confession request rejected");
            }
        }
    }
}

impl From<JsonRejection> for ConfessionError {
    fn from(rejection: JsonRejection) -> Self {
        ConfessionError::MalformedRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ConfessionError {
    fn from(rejection: QueryRejection) -> Self {
        ConfessionError::MalformedRequest(rejection.body_text())
    }
}

impl IntoResponse for ConfessionError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
