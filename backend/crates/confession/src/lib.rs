//! Confession Board Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and collaborator traits
//! - `application/` - One use case per operation
//! - `infra/` - PostgreSQL repository, upload helper process, moderation API client
//! - `presentation/` - HTTP handlers, DTOs, router, caller identity middleware
//!
//! ## Features
//! - Moderation-gated publishing with a failure-open policy
//! - Permanent storage of every confession through the upload gateway
//! - One vote per (target, voter), enforced by a unique index
//! - Threaded replies, search, trending lists and board statistics
//!
//! ## Collaborators
//! - Upload gateway: an external helper process speaking JSON over stdio
//! - Moderation: an HTTP API returning `{approved, flagged, enhancement?}`
//! - Identity: bearer tokens minted by the account service (verified only)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::{ConfessionConfig, GatewayConfig, ModerationConfig};
pub use error::{ConfessionError, ConfessionResult};
pub use infra::moderation::HttpModerationClient;
pub use infra::postgres::PgConfessionRepository;
pub use infra::upload_gateway::ProcessUploadGateway;
pub use presentation::router::{confession_router, confession_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::{Confession, NewConfession, Reply, Vote};
    pub use crate::domain::value_object::{
        Author, Content, ModerationRecord, Mood, Page, SearchCriteria, SortKey, SortOrder, Tags,
        ValidationError, VoteCounts, VoteTarget, VoteType,
    };
    pub use crate::presentation::dto::*;
}
