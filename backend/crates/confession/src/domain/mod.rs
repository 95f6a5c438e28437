//! Domain Layer
//!
//! Contains entities, value objects, repository traits and the contracts of
//! the external collaborators (upload gateway, moderation).

pub mod entity;
pub mod gateway;
pub mod read_model;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{Confession, NewConfession, Reply, Vote};
pub use gateway::{ModerationClient, UploadGateway};
pub use repository::{
    BoardRepository, ConfessionRepository, ReplyRepository, StatsRepository, VoteRepository,
};
