//! Browse Use Case
//!
//! Read-only listings over listed confessions: the public feed, the
//! trending list and the tag ranking.

use std::sync::Arc;

use crate::domain::entity::Confession;
use crate::domain::read_model::TagCount;
use crate::domain::repository::ConfessionRepository;
use crate::domain::value_object::Page;
use crate::domain::value_object::page::{DEFAULT_TAGS_LIMIT, DEFAULT_TRENDING_LIMIT};
use crate::error::ConfessionResult;

pub struct BrowseUseCase<C>
where
    C: ConfessionRepository,
{
    confession_repo: Arc<C>,
}

impl<C> BrowseUseCase<C>
where
    C: ConfessionRepository,
{
    pub fn new(confession_repo: Arc<C>) -> Self {
        Self { confession_repo }
    }

    /// Newest listed confessions first
    pub async fn public_feed(&self, page: Page) -> ConfessionResult<Vec<Confession>> {
        self.confession_repo.list_public(page).await
    }

    /// Most upvoted listed confessions first
    pub async fn trending(&self, limit: Option<i64>) -> ConfessionResult<Vec<Confession>> {
        let page = Page::first(limit, DEFAULT_TRENDING_LIMIT);
        self.confession_repo.list_trending(page.limit).await
    }

    pub async fn trending_tags(&self, limit: Option<i64>) -> ConfessionResult<Vec<TagCount>> {
        let page = Page::first(limit, DEFAULT_TAGS_LIMIT);
        self.confession_repo.trending_tags(page.limit).await
    }
}
