use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use kernel::id::{ConfessionId, ReplyId};
use uuid::Uuid;

use super::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum VoteType {
    Upvote = 1,
    Downvote = 2,
}

impl VoteType {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            VoteType::Upvote => "upvote",
            VoteType::Downvote => "downvote",
        }
    }
}

impl FromStr for VoteType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upvote" => Ok(VoteType::Upvote),
            "downvote" => Ok(VoteType::Downvote),
            _ => Err(ValidationError::InvalidVoteType(s.to_string())),
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// What a vote is cast on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTarget {
    Confession(ConfessionId),
    Reply(ReplyId),
}

impl VoteTarget {
    /// Discriminator stored in `votes.target_kind`
    #[inline]
    pub const fn kind_id(&self) -> i16 {
        match self {
            VoteTarget::Confession(_) => 1,
            VoteTarget::Reply(_) => 2,
        }
    }

    pub fn uuid(&self) -> Uuid {
        match self {
            VoteTarget::Confession(id) => id.into_uuid(),
            VoteTarget::Reply(id) => id.into_uuid(),
        }
    }
}

impl fmt::Display for VoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteTarget::Confession(id) => write!(f, "confession:{id}"),
            VoteTarget::Reply(id) => write!(f, "reply:{id}"),
        }
    }
}

/// Up/down counters carried by confessions and replies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VoteCounts {
    pub upvotes: i64,
    pub downvotes: i64,
}

impl VoteCounts {
    pub fn new(upvotes: i64, downvotes: i64) -> Self {
        Self { upvotes, downvotes }
    }

    /// Counters after one more vote of `vote_type`
    pub fn with_vote(self, vote_type: VoteType) -> Self {
        match vote_type {
            VoteType::Upvote => Self {
                upvotes: self.upvotes + 1,
                ..self
            },
            VoteType::Downvote => Self {
                downvotes: self.downvotes + 1,
                ..self
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_type_parse() {
        assert_eq!("upvote".parse::<VoteType>().unwrap(), VoteType::Upvote);
        assert_eq!("DOWNVOTE".parse::<VoteType>().unwrap(), VoteType::Downvote);
        assert!(matches!(
            "like".parse::<VoteType>(),
            Err(ValidationError::InvalidVoteType(_))
        ));
    }

    #[test]
    fn test_vote_type_ids_are_distinct() {
        assert_eq!(VoteType::Upvote.id(), 1);
        assert_eq!(VoteType::Downvote.id(), 2);
    }

    #[test]
    fn test_counts_with_vote() {
        let counts = VoteCounts::default()
            .with_vote(VoteType::Upvote)
            .with_vote(VoteType::Upvote)
            .with_vote(VoteType::Downvote);
        assert_eq!(counts, VoteCounts::new(2, 1));
    }

    #[test]
    fn test_target_kind() {
        let c = VoteTarget::Confession(ConfessionId::new());
        let r = VoteTarget::Reply(ReplyId::new());
        assert_ne!(c.kind_id(), r.kind_id());
        assert!(c.to_string().starts_with("confession:"));
    }
}
