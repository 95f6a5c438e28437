//! API DTOs (Data Transfer Objects)
//!
//! Field names are snake_case on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::NetworkInfo;
use crate::domain::entity::{Confession, Reply};
use crate::domain::gateway::WalletBalance;
use crate::domain::read_model::{BoardStats, TagCount};
use crate::domain::value_object::{ModerationRecord, Mood, VoteCounts};

fn default_true() -> bool {
    true
}

// ============================================================================
// Query strings
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

// ============================================================================
// Confessions
// ============================================================================

/// Create confession request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateConfessionRequest {
    pub content: String,
    #[serde(default = "default_true")]
    pub is_public: bool,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModerationDto {
    pub approved: bool,
    pub flagged: bool,
    pub reviewed: bool,
    pub moderation_service_failed: bool,
}

impl From<&ModerationRecord> for ModerationDto {
    fn from(record: &ModerationRecord) -> Self {
        Self {
            approved: record.approved,
            flagged: record.flagged,
            reviewed: record.reviewed,
            moderation_service_failed: record.service_failed,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AiAnalysisDto {
    pub enhancement: String,
}

impl AiAnalysisDto {
    fn from_record(record: &ModerationRecord) -> Option<Self> {
        record.enhancement.clone().map(|enhancement| Self { enhancement })
    }
}

/// Create confession response
#[derive(Debug, Clone, Serialize)]
pub struct CreateConfessionResponse {
    pub status: &'static str,
    pub id: Uuid,
    pub tx_id: String,
    pub gateway_url: String,
    pub explorer_url: String,
    pub share_url: String,
    pub verified: bool,
    pub moderation: ModerationDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<AiAnalysisDto>,
    pub message: &'static str,
}

impl From<&Confession> for CreateConfessionResponse {
    fn from(c: &Confession) -> Self {
        Self {
            status: "success",
            id: c.confession_id.into_uuid(),
            tx_id: c.tx_id.clone(),
            gateway_url: c.gateway_url.clone(),
            explorer_url: c.explorer_url.clone(),
            share_url: c.share_path(),
            verified: true,
            moderation: ModerationDto::from(&c.moderation),
            ai_analysis: AiAnalysisDto::from_record(&c.moderation),
            message: "Confession posted successfully!",
        }
    }
}

/// A stored confession as returned by read endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ConfessionResponse {
    pub id: Uuid,
    pub tx_id: String,
    pub content: String,
    pub author: String,
    pub is_public: bool,
    pub mood: Option<Mood>,
    pub tags: Vec<String>,
    pub upvotes: i64,
    pub downvotes: i64,
    pub timestamp: DateTime<Utc>,
    pub gateway_url: String,
    pub explorer_url: String,
    pub share_url: String,
    pub verified: bool,
    pub moderation: ModerationDto,
}

impl From<&Confession> for ConfessionResponse {
    fn from(c: &Confession) -> Self {
        Self {
            id: c.confession_id.into_uuid(),
            tx_id: c.tx_id.clone(),
            content: c.content.as_str().to_string(),
            author: c.author.as_str().to_string(),
            is_public: c.is_public,
            mood: c.mood,
            tags: c.tags.as_slice().to_vec(),
            upvotes: c.votes.upvotes,
            downvotes: c.votes.downvotes,
            timestamp: c.created_at,
            gateway_url: c.gateway_url.clone(),
            explorer_url: c.explorer_url.clone(),
            share_url: c.share_path(),
            verified: true,
            moderation: ModerationDto::from(&c.moderation),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfessionListResponse {
    pub confessions: Vec<ConfessionResponse>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

impl ConfessionListResponse {
    pub fn new(confessions: &[Confession]) -> Self {
        Self {
            confessions: confessions.iter().map(ConfessionResponse::from).collect(),
            count: confessions.len(),
            limit: None,
            offset: None,
        }
    }

    pub fn paged(confessions: &[Confession], limit: i64, offset: i64) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
            ..Self::new(confessions)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub updated: bool,
    pub moderation: ModerationDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<AiAnalysisDto>,
}

impl ReviewResponse {
    pub fn new(confession: &Confession, updated: bool) -> Self {
        Self {
            id: confession.confession_id.into_uuid(),
            updated,
            moderation: ModerationDto::from(&confession.moderation),
            ai_analysis: AiAnalysisDto::from_record(&confession.moderation),
        }
    }
}

// ============================================================================
// Votes
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct VoteRequest {
    pub vote_type: String,
    /// Wallet address or other self-declared voter key
    #[serde(default)]
    pub user_address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VoteResponse {
    pub status: &'static str,
    pub message: String,
    pub upvotes: i64,
    pub downvotes: i64,
}

impl VoteResponse {
    pub fn new(vote_type: &str, counts: VoteCounts) -> Self {
        Self {
            status: "success",
            message: format!("{} recorded", vote_type.trim().to_ascii_lowercase()),
            upvotes: counts.upvotes,
            downvotes: counts.downvotes,
        }
    }
}

// ============================================================================
// Replies
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReplyRequest {
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub parent_reply_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplyResponse {
    pub id: Uuid,
    pub confession_id: Uuid,
    pub parent_reply_id: Option<Uuid>,
    pub content: String,
    pub author: String,
    pub upvotes: i64,
    pub downvotes: i64,
    pub timestamp: DateTime<Utc>,
}

impl From<&Reply> for ReplyResponse {
    fn from(r: &Reply) -> Self {
        Self {
            id: r.reply_id.into_uuid(),
            confession_id: r.confession_id.into_uuid(),
            parent_reply_id: r.parent_reply_id.map(|id| id.into_uuid()),
            content: r.content.as_str().to_string(),
            author: r.author.as_str().to_string(),
            upvotes: r.votes.upvotes,
            downvotes: r.votes.downvotes,
            timestamp: r.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateReplyResponse {
    pub status: &'static str,
    pub reply: ReplyResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplyListResponse {
    pub replies: Vec<ReplyResponse>,
    pub count: usize,
    pub limit: i64,
    pub offset: i64,
}

// ============================================================================
// Search
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub confessions: Vec<ConfessionResponse>,
    pub count: usize,
    pub query: String,
    pub mood: Option<Mood>,
    pub tags: Vec<String>,
    pub sort_by: &'static str,
    pub sort_order: &'static str,
    pub limit: i64,
    pub offset: i64,
}

// ============================================================================
// Tags / Analytics / Storage network
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TrendingTagsResponse {
    pub tags: Vec<TagCount>,
}

pub type StatsResponse = BoardStats;

pub type NetworkInfoResponse = NetworkInfo;

pub type BalanceResponse = WalletBalance;

#[derive(Debug, Clone, Serialize)]
pub struct AddressResponse {
    pub address: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfoResponse {
    pub message: &'static str,
    pub status: &'static str,
}
