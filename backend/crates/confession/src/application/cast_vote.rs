//! Cast Vote Use Case

use std::sync::Arc;

use crate::domain::entity::Vote;
use crate::domain::repository::{ConfessionRepository, ReplyRepository, VoteRepository};
use crate::domain::value_object::{VoteCounts, VoteTarget, VoteType};
use crate::error::{ConfessionError, ConfessionResult};

pub struct CastVoteInput {
    pub target: VoteTarget,
    pub vote_type: String,
    /// Already resolved through `CallerIdentity::voter_identity`
    pub voter_identity: String,
}

pub struct CastVoteUseCase<C, R, V>
where
    C: ConfessionRepository,
    R: ReplyRepository,
    V: VoteRepository,
{
    confession_repo: Arc<C>,
    reply_repo: Arc<R>,
    vote_repo: Arc<V>,
}

impl<C, R, V> CastVoteUseCase<C, R, V>
where
    C: ConfessionRepository,
    R: ReplyRepository,
    V: VoteRepository,
{
    pub fn new(confession_repo: Arc<C>, reply_repo: Arc<R>, vote_repo: Arc<V>) -> Self {
        Self {
            confession_repo,
            reply_repo,
            vote_repo,
        }
    }

    /// Record one vote and return the target's updated counters
    ///
    /// A repeated vote by the same voter fails with `DuplicateVote`; the
    /// repository enforces this with a unique index, so concurrent repeats
    /// cannot both succeed.
    pub async fn execute(&self, input: CastVoteInput) -> ConfessionResult<VoteCounts> {
        let vote_type: VoteType = input.vote_type.parse()?;

        match input.target {
            VoteTarget::Confession(id) => {
                if self.confession_repo.find_by_id(id).await?.is_none() {
                    return Err(ConfessionError::ConfessionNotFound);
                }
            }
            VoteTarget::Reply(id) => {
                if self.reply_repo.find_by_id(id).await?.is_none() {
                    return Err(ConfessionError::ReplyNotFound);
                }
            }
        }

        let vote = Vote::new(input.target, input.voter_identity, vote_type);
        let counts = self.vote_repo.cast(&vote).await?;

        tracing::info!(
            target = %vote.target,
            vote_type = %vote.vote_type,
            upvotes = counts.upvotes,
            downvotes = counts.downvotes,
            "Vote recorded"
        );

        Ok(counts)
    }
}
