use chrono::{DateTime, Utc};
use kernel::id::{ConfessionId, ReplyId, UserId};

use crate::domain::value_object::{Author, Content, VoteCounts};

/// Reply under a confession, optionally nested under another reply
#[derive(Debug, Clone)]
pub struct Reply {
    pub reply_id: ReplyId,
    pub confession_id: ConfessionId,
    pub parent_reply_id: Option<ReplyId>,
    pub content: Content,
    pub author: Author,
    pub author_user_id: Option<UserId>,
    pub votes: VoteCounts,
    pub created_at: DateTime<Utc>,
}

impl Reply {
    pub fn new(
        confession_id: ConfessionId,
        parent_reply_id: Option<ReplyId>,
        content: Content,
        author: Author,
        author_user_id: Option<UserId>,
    ) -> Self {
        Self {
            reply_id: ReplyId::new(),
            confession_id,
            parent_reply_id,
            content,
            author,
            author_user_id,
            votes: VoteCounts::default(),
            created_at: Utc::now(),
        }
    }
}
