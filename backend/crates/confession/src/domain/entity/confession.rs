//! Confession Entity
//!
//! The primary post. Immutable once stored, apart from vote counters and
//! moderation re-review.

use chrono::{DateTime, Utc};
use kernel::id::{ConfessionId, UserId};

use crate::domain::gateway::UploadReceipt;
use crate::domain::value_object::{Author, Content, ModerationRecord, Mood, Tags, VoteCounts};

/// Validated submission, before moderation and upload
#[derive(Debug, Clone)]
pub struct NewConfession {
    pub content: Content,
    pub author: Author,
    pub author_user_id: Option<UserId>,
    pub is_public: bool,
    pub mood: Option<Mood>,
    pub tags: Tags,
}

#[derive(Debug, Clone)]
pub struct Confession {
    pub confession_id: ConfessionId,
    /// Transaction id assigned by the upload gateway
    pub tx_id: String,
    pub content: Content,
    pub author: Author,
    pub author_user_id: Option<UserId>,
    pub is_public: bool,
    pub mood: Option<Mood>,
    pub tags: Tags,
    pub moderation: ModerationRecord,
    pub gateway_url: String,
    pub explorer_url: String,
    pub votes: VoteCounts,
    pub created_at: DateTime<Utc>,
}

impl Confession {
    /// Assemble a confession from a submission that has been moderated and uploaded
    pub fn publish(
        submission: NewConfession,
        moderation: ModerationRecord,
        receipt: UploadReceipt,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            confession_id: ConfessionId::new(),
            tx_id: receipt.tx_id,
            content: submission.content,
            author: submission.author,
            author_user_id: submission.author_user_id,
            is_public: submission.is_public,
            mood: submission.mood,
            tags: submission.tags,
            moderation,
            gateway_url: receipt.gateway_url,
            explorer_url: receipt.explorer_url,
            votes: VoteCounts::default(),
            created_at,
        }
    }

    /// Shown in the feed, trending, search and tag listings
    pub fn is_listed(&self) -> bool {
        self.is_public && self.moderation.allows_listing()
    }

    /// Path the frontend routes to for a single confession
    pub fn share_path(&self) -> String {
        format!("/#/c/{}", self.tx_id)
    }
}
