//! Value Object Module

pub mod author;
pub mod content;
pub mod moderation;
pub mod mood;
pub mod page;
pub mod search;
pub mod tags;
pub mod vote;

pub use author::Author;
pub use content::Content;
pub use moderation::ModerationRecord;
pub use mood::Mood;
pub use page::Page;
pub use search::{SearchCriteria, SortKey, SortOrder};
pub use tags::Tags;
pub use vote::{VoteCounts, VoteTarget, VoteType};

/// Rejected input, reported to the caller as a 400
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Content cannot be empty")]
    EmptyContent,

    #[error("Content must be {max} characters or less (got {actual})")]
    ContentTooLong { max: usize, actual: usize },

    #[error("Author name must be {max} characters or less")]
    AuthorTooLong { max: usize },

    #[error("Unknown mood '{0}'")]
    UnknownMood(String),

    #[error("At most {max} tags are allowed")]
    TooManyTags { max: usize },

    #[error("Tag '{tag}' is longer than {max} characters")]
    TagTooLong { tag: String, max: usize },

    #[error("vote_type must be 'upvote' or 'downvote', got '{0}'")]
    InvalidVoteType(String),

    #[error("sort_by must be 'timestamp' or 'upvotes', got '{0}'")]
    InvalidSortKey(String),

    #[error("sort_order must be 'asc' or 'desc', got '{0}'")]
    InvalidSortOrder(String),
}
