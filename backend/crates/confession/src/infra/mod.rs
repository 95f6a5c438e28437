//! Infrastructure Layer
//!
//! Database repository and clients for the external collaborators.

pub mod moderation;
pub mod postgres;
pub mod upload_gateway;
