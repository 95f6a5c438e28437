//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC, Base64)
//! - Client identification (User-Agent fingerprint, client IP, bearer token)
//! - Signed identity tokens issued by the auth service
//! - Outbound HTTP client construction with bounded timeouts

pub mod client;
pub mod crypto;
pub mod http_client;
pub mod identity;
