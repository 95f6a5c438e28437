//! Publish Confession Use Case
//!
//! validate → moderate (failure-open) → upload → persist.
//! Nothing is written unless the upload succeeded.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde_json::json;
use std::sync::Arc;

use crate::application::config::ConfessionConfig;
use crate::domain::entity::{Confession, NewConfession};
use crate::domain::gateway::{
    ModerationClient, ModerationError, UploadGateway, UploadRequest, UploadTag,
};
use crate::domain::repository::ConfessionRepository;
use crate::domain::value_object::{Author, Content, ModerationRecord, Mood, Tags};
use crate::error::ConfessionResult;

/// Publish input (raw, as submitted)
pub struct PublishInput {
    pub content: String,
    pub is_public: bool,
    pub author: Option<String>,
    pub author_user_id: Option<UserId>,
    pub mood: Option<String>,
    pub tags: Vec<String>,
}

impl PublishInput {
    fn validate(self) -> ConfessionResult<NewConfession> {
        Ok(NewConfession {
            content: Content::new(self.content)?,
            author: Author::new(self.author.as_deref())?,
            author_user_id: self.author_user_id,
            is_public: self.is_public,
            mood: Mood::parse_optional(self.mood.as_deref())?,
            tags: Tags::new(&self.tags)?,
        })
    }
}

/// Run one moderation check and turn the verdict into a record
pub(crate) async fn moderate<M>(client: &M, text: &str) -> Result<ModerationRecord, ModerationError>
where
    M: ModerationClient,
{
    client.check(text).await.map(ModerationRecord::from_verdict)
}

/// Publish confession use case
pub struct PublishConfessionUseCase<C, G, M>
where
    C: ConfessionRepository,
    G: UploadGateway,
    M: ModerationClient,
{
    confession_repo: Arc<C>,
    gateway: Arc<G>,
    moderation: Arc<M>,
    config: Arc<ConfessionConfig>,
}

impl<C, G, M> PublishConfessionUseCase<C, G, M>
where
    C: ConfessionRepository,
    G: UploadGateway,
    M: ModerationClient,
{
    pub fn new(
        confession_repo: Arc<C>,
        gateway: Arc<G>,
        moderation: Arc<M>,
        config: Arc<ConfessionConfig>,
    ) -> Self {
        Self {
            confession_repo,
            gateway,
            moderation,
            config,
        }
    }

    pub async fn execute(&self, input: PublishInput) -> ConfessionResult<Confession> {
        let submission = input.validate()?;

        let moderation = match moderate(self.moderation.as_ref(), submission.content.as_str()).await
        {
            Ok(record) => record,
            Err(ModerationError::NotConfigured) => {
                tracing::debug!("Moderation not configured, publishing unreviewed");
                ModerationRecord::failure_open()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Moderation check failed, publishing unreviewed");
                ModerationRecord::failure_open()
            }
        };

        let now = Utc::now();
        let request = self.upload_request(&submission, now);
        let receipt = self.gateway.upload(&request).await?;

        let confession = Confession::publish(submission, moderation, receipt, now);
        self.confession_repo.create(&confession).await?;

        tracing::info!(
            confession_id = %confession.confession_id,
            tx_id = %confession.tx_id,
            is_public = confession.is_public,
            approved = confession.moderation.approved,
            moderation_failed = confession.moderation.service_failed,
            "Confession published"
        );

        Ok(confession)
    }

    fn upload_request(&self, submission: &NewConfession, now: DateTime<Utc>) -> UploadRequest {
        let mut tags = vec![
            UploadTag::new("Content-Type", "confession"),
            UploadTag::new("Public", submission.is_public.to_string()),
            UploadTag::new("App", self.config.app_identifier.as_str()),
            UploadTag::new("Timestamp", now.timestamp().to_string()),
        ];
        if let Some(mood) = submission.mood {
            tags.push(UploadTag::new("Mood", mood.code()));
        }
        tags.extend(
            submission
                .tags
                .as_slice()
                .iter()
                .map(|tag| UploadTag::new("Tag", tag.as_str())),
        );

        let data = json!({
            "content": submission.content.as_str(),
            "is_public": submission.is_public,
            "author": submission.author.as_str(),
            "mood": submission.mood,
            "tags": submission.tags.as_slice(),
            "timestamp": now.to_rfc3339(),
        });

        UploadRequest { data, tags }
    }
}
