use std::str::FromStr;

use super::{Mood, Page, ValidationError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Timestamp,
    Upvotes,
}

impl SortKey {
    pub const fn code(&self) -> &'static str {
        match self {
            SortKey::Timestamp => "timestamp",
            SortKey::Upvotes => "upvotes",
        }
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "timestamp" | "created_at" => Ok(SortKey::Timestamp),
            "upvotes" => Ok(SortKey::Upvotes),
            _ => Err(ValidationError::InvalidSortKey(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub const fn code(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(ValidationError::InvalidSortOrder(s.to_string())),
        }
    }
}

/// Validated search request
///
/// Filters combine conjunctively; `tags` matches when any tag overlaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Trimmed free text; empty means no text filter
    pub query: String,
    pub mood: Option<Mood>,
    /// Canonical tags
    pub tags: Vec<String>,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
    pub page: Page,
}

/// Escape `%`, `_` and `\` so the query matches as a literal substring
pub fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
