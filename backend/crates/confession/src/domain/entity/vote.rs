use chrono::{DateTime, Utc};
use kernel::id::VoteId;

use crate::domain::value_object::{VoteTarget, VoteType};

/// A single vote; never mutated once stored
#[derive(Debug, Clone)]
pub struct Vote {
    pub vote_id: VoteId,
    pub target: VoteTarget,
    /// Who voted: user id, wallet address, fingerprint key, or `anonymous`
    pub voter_identity: String,
    pub vote_type: VoteType,
    pub created_at: DateTime<Utc>,
}

impl Vote {
    pub fn new(target: VoteTarget, voter_identity: String, vote_type: VoteType) -> Self {
        Self {
            vote_id: VoteId::new(),
            target,
            voter_identity,
            vote_type,
            created_at: Utc::now(),
        }
    }
}
