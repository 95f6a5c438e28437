//! Collaborator contracts
//!
//! Both collaborators are request/response with typed failures. Callers get
//! a bounded wait from every implementation.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// Upload Gateway
// ============================================================================

/// `{name, value}` metadata pair attached to an upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTag {
    pub name: String,
    pub value: String,
}

impl UploadTag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    /// Document to store permanently
    pub data: serde_json::Value,
    pub tags: Vec<UploadTag>,
}

/// Proof of a successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub tx_id: String,
    pub gateway_url: String,
    pub explorer_url: String,
    /// Network timestamp in milliseconds, when reported
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletBalance {
    /// Atomic units
    pub balance: String,
    /// Human-readable units
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("upload helper could not be started: {0}")]
    Spawn(String),

    #[error("upload helper I/O failed: {0}")]
    Io(String),

    #[error("upload helper did not answer within {0:?}")]
    Timeout(Duration),

    #[error("upload helper exited with {0}")]
    Exited(String),

    #[error("upload helper produced no reply")]
    EmptyReply,

    #[error("upload helper reply is malformed: {0}")]
    Malformed(String),

    #[error("upload rejected: {0}")]
    Rejected(String),
}

/// Client for the immutable storage network
#[trait_variant::make(UploadGateway: Send)]
pub trait LocalUploadGateway {
    /// Store a document and return where it can be retrieved
    async fn upload(&self, request: &UploadRequest) -> Result<UploadReceipt, UploadError>;

    /// Balance of the funding wallet
    async fn balance(&self) -> Result<WalletBalance, UploadError>;

    /// Address of the funding wallet
    async fn address(&self) -> Result<String, UploadError>;
}

// ============================================================================
// Moderation
// ============================================================================

/// Verdict returned by the moderation service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModerationVerdict {
    pub approved: bool,
    pub flagged: bool,
    #[serde(default)]
    pub enhancement: Option<String>,
}

/// Never surfaced to callers; see the publish use case
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModerationError {
    #[error("moderation service is not configured")]
    NotConfigured,

    #[error("moderation service timed out")]
    Timeout,

    #[error("moderation transport error: {0}")]
    Transport(String),

    #[error("moderation service returned status {0}")]
    Status(u16),

    #[error("moderation response is malformed: {0}")]
    Malformed(String),
}

#[trait_variant::make(ModerationClient: Send)]
pub trait LocalModerationClient {
    async fn check(&self, text: &str) -> Result<ModerationVerdict, ModerationError>;
}
