//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::ConfessionAppState;
pub use middleware::resolve_caller;
pub use router::{confession_router, confession_router_generic};
