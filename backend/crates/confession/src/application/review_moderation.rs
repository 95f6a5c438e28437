//! Review Moderation Use Case
//!
//! Re-run moderation on a stored confession. Unlike publishing, a failed
//! check changes nothing: the existing record stays as it is.

use kernel::id::ConfessionId;
use std::sync::Arc;

use crate::application::publish_confession::moderate;
use crate::domain::entity::Confession;
use crate::domain::gateway::ModerationClient;
use crate::domain::repository::ConfessionRepository;
use crate::error::{ConfessionError, ConfessionResult};

pub struct ReviewOutput {
    pub confession: Confession,
    /// Whether a fresh verdict replaced the stored record
    pub updated: bool,
}

pub struct ReviewModerationUseCase<C, M>
where
    C: ConfessionRepository,
    M: ModerationClient,
{
    confession_repo: Arc<C>,
    moderation: Arc<M>,
}

impl<C, M> ReviewModerationUseCase<C, M>
where
    C: ConfessionRepository,
    M: ModerationClient,
{
    pub fn new(confession_repo: Arc<C>, moderation: Arc<M>) -> Self {
        Self {
            confession_repo,
            moderation,
        }
    }

    pub async fn execute(&self, confession_id: ConfessionId) -> ConfessionResult<ReviewOutput> {
        let mut confession = self
            .confession_repo
            .find_by_id(confession_id)
            .await?
            .ok_or(ConfessionError::ConfessionNotFound)?;

        match moderate(self.moderation.as_ref(), confession.content.as_str()).await {
            Ok(record) => {
                self.confession_repo
                    .update_moderation(confession_id, &record)
                    .await?;
                tracing::info!(
                    confession_id = %confession_id,
                    approved = record.approved,
                    flagged = record.flagged,
                    "Moderation re-review applied"
                );
                confession.moderation = record;
                Ok(ReviewOutput {
                    confession,
                    updated: true,
                })
            }
            Err(e) => {
                tracing::warn!(
                    confession_id = %confession_id,
                    error = %e,
                    "Moderation re-review failed, record unchanged"
                );
                Ok(ReviewOutput {
                    confession,
                    updated: false,
                })
            }
        }
    }
}
