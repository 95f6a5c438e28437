//! Reply Use Cases

use kernel::id::{ConfessionId, ReplyId, UserId};
use std::sync::Arc;

use crate::domain::entity::Reply;
use crate::domain::repository::{ConfessionRepository, ReplyRepository};
use crate::domain::value_object::{Author, Content, Page};
use crate::error::{ConfessionError, ConfessionResult};

pub struct CreateReplyInput {
    pub confession_id: ConfessionId,
    pub parent_reply_id: Option<ReplyId>,
    pub content: String,
    pub author: Option<String>,
    pub author_user_id: Option<UserId>,
}

/// Create a reply under a confession or under another reply of it
pub struct CreateReplyUseCase<C, R>
where
    C: ConfessionRepository,
    R: ReplyRepository,
{
    confession_repo: Arc<C>,
    reply_repo: Arc<R>,
}

impl<C, R> CreateReplyUseCase<C, R>
where
    C: ConfessionRepository,
    R: ReplyRepository,
{
    pub fn new(confession_repo: Arc<C>, reply_repo: Arc<R>) -> Self {
        Self {
            confession_repo,
            reply_repo,
        }
    }

    pub async fn execute(&self, input: CreateReplyInput) -> ConfessionResult<Reply> {
        let content = Content::new(input.content)?;
        let author = Author::new(input.author.as_deref())?;

        if self
            .confession_repo
            .find_by_id(input.confession_id)
            .await?
            .is_none()
        {
            return Err(ConfessionError::ConfessionNotFound);
        }

        if let Some(parent_id) = input.parent_reply_id {
            // The parent must live in the same thread
            let parent = self.reply_repo.find_by_id(parent_id).await?;
            if parent.is_none_or(|p| p.confession_id != input.confession_id) {
                return Err(ConfessionError::ReplyNotFound);
            }
        }

        let reply = Reply::new(
            input.confession_id,
            input.parent_reply_id,
            content,
            author,
            input.author_user_id,
        );
        self.reply_repo.create(&reply).await?;

        tracing::info!(
            reply_id = %reply.reply_id,
            confession_id = %reply.confession_id,
            nested = reply.parent_reply_id.is_some(),
            "Reply created"
        );

        Ok(reply)
    }
}

/// List a confession's replies, oldest first
pub struct ListRepliesUseCase<C, R>
where
    C: ConfessionRepository,
    R: ReplyRepository,
{
    confession_repo: Arc<C>,
    reply_repo: Arc<R>,
}

impl<C, R> ListRepliesUseCase<C, R>
where
    C: ConfessionRepository,
    R: ReplyRepository,
{
    pub fn new(confession_repo: Arc<C>, reply_repo: Arc<R>) -> Self {
        Self {
            confession_repo,
            reply_repo,
        }
    }

    pub async fn execute(
        &self,
        confession_id: ConfessionId,
        page: Page,
    ) -> ConfessionResult<Vec<Reply>> {
        if self.confession_repo.find_by_id(confession_id).await?.is_none() {
            return Err(ConfessionError::ConfessionNotFound);
        }
        self.reply_repo.list_for_confession(confession_id, page).await
    }
}
