//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::{ConfessionId, ReplyId};

use crate::domain::entity::{Confession, Reply, Vote};
use crate::domain::read_model::{BoardStats, TagCount};
use crate::domain::value_object::{ModerationRecord, Page, SearchCriteria, VoteCounts};
use crate::error::ConfessionResult;

/// Confession repository trait
///
/// Listing queries (`list_public`, `list_trending`, `search`,
/// `trending_tags`) only return public confessions whose moderation record
/// allows listing.
#[trait_variant::make(ConfessionRepository: Send)]
pub trait LocalConfessionRepository {
    /// Insert a new confession
    async fn create(&self, confession: &Confession) -> ConfessionResult<()>;

    async fn find_by_id(&self, confession_id: ConfessionId) -> ConfessionResult<Option<Confession>>;

    /// Exact lookup by upload transaction id, regardless of visibility
    async fn find_by_tx_id(&self, tx_id: &str) -> ConfessionResult<Option<Confession>>;

    /// Newest first
    async fn list_public(&self, page: Page) -> ConfessionResult<Vec<Confession>>;

    /// Most upvoted first
    async fn list_trending(&self, limit: i64) -> ConfessionResult<Vec<Confession>>;

    async fn search(&self, criteria: &SearchCriteria) -> ConfessionResult<Vec<Confession>>;

    /// Tag frequency, count descending then tag ascending
    async fn trending_tags(&self, limit: i64) -> ConfessionResult<Vec<TagCount>>;

    /// Replace the moderation record after a re-review
    async fn update_moderation(
        &self,
        confession_id: ConfessionId,
        record: &ModerationRecord,
    ) -> ConfessionResult<()>;
}

/// Reply repository trait
#[trait_variant::make(ReplyRepository: Send)]
pub trait LocalReplyRepository {
    async fn create(&self, reply: &Reply) -> ConfessionResult<()>;

    async fn find_by_id(&self, reply_id: ReplyId) -> ConfessionResult<Option<Reply>>;

    /// Oldest first
    async fn list_for_confession(
        &self,
        confession_id: ConfessionId,
        page: Page,
    ) -> ConfessionResult<Vec<Reply>>;
}

/// Vote repository trait
#[trait_variant::make(VoteRepository: Send)]
pub trait LocalVoteRepository {
    /// Store the vote and bump the target's counter as one atomic step
    ///
    /// Fails with `DuplicateVote` when the voter already voted on the target,
    /// leaving the counters untouched. Returns the counters after the vote.
    async fn cast(&self, vote: &Vote) -> ConfessionResult<VoteCounts>;
}

#[trait_variant::make(StatsRepository: Send)]
pub trait LocalStatsRepository {
    /// Counters at request time; `since` bounds the recent-activity window
    async fn board_stats(&self, since: DateTime<Utc>) -> ConfessionResult<BoardStats>;
}

/// Everything the HTTP surface needs from storage
pub trait BoardRepository:
    ConfessionRepository + ReplyRepository + VoteRepository + StatsRepository + Clone + Send + Sync + 'static
{
}

impl<T> BoardRepository for T where
    T: ConfessionRepository
        + ReplyRepository
        + VoteRepository
        + StatsRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
