//! Entity Module

pub mod confession;
pub mod reply;
pub mod vote;

pub use confession::{Confession, NewConfession};
pub use reply::Reply;
pub use vote::Vote;
