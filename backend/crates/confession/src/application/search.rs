//! Search Use Case

use std::sync::Arc;

use crate::domain::entity::Confession;
use crate::domain::repository::ConfessionRepository;
use crate::domain::value_object::page::DEFAULT_SEARCH_LIMIT;
use crate::domain::value_object::tags::canonical_tag;
use crate::domain::value_object::{Mood, Page, SearchCriteria, SortKey, SortOrder};
use crate::error::ConfessionResult;

/// Search input (raw, as submitted)
#[derive(Debug, Default)]
pub struct SearchInput {
    pub query: Option<String>,
    pub mood: Option<String>,
    pub tags: Vec<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl SearchInput {
    fn into_criteria(self) -> ConfessionResult<SearchCriteria> {
        let sort_by = match self.sort_by.as_deref().map(str::trim) {
            None | Some("") => SortKey::default(),
            Some(key) => key.parse()?,
        };
        let sort_order = match self.sort_order.as_deref().map(str::trim) {
            None | Some("") => SortOrder::default(),
            Some(order) => order.parse()?,
        };

        let mut tags: Vec<String> = Vec::new();
        for tag in self.tags.iter().filter_map(|t| canonical_tag(t)) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        Ok(SearchCriteria {
            query: self.query.unwrap_or_default().trim().to_string(),
            mood: Mood::parse_optional(self.mood.as_deref())?,
            tags,
            sort_by,
            sort_order,
            page: Page::new(self.limit, self.offset, DEFAULT_SEARCH_LIMIT),
        })
    }
}

pub struct SearchOutput {
    /// Normalised parameters, echoed back to the client
    pub criteria: SearchCriteria,
    pub confessions: Vec<Confession>,
}

pub struct SearchUseCase<C>
where
    C: ConfessionRepository,
{
    confession_repo: Arc<C>,
}

impl<C> SearchUseCase<C>
where
    C: ConfessionRepository,
{
    pub fn new(confession_repo: Arc<C>) -> Self {
        Self { confession_repo }
    }

    pub async fn execute(&self, input: SearchInput) -> ConfessionResult<SearchOutput> {
        let criteria = input.into_criteria()?;
        let confessions = self.confession_repo.search(&criteria).await?;

        tracing::debug!(
            query = %criteria.query,
            results = confessions.len(),
            "Search executed"
        );

        Ok(SearchOutput {
            criteria,
            confessions,
        })
    }
}
