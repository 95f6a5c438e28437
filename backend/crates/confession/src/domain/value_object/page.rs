/// Upper bound for any page size
pub const MAX_LIMIT: i64 = 100;

pub const DEFAULT_FEED_LIMIT: i64 = 50;
pub const DEFAULT_REPLIES_LIMIT: i64 = 50;
pub const DEFAULT_TRENDING_LIMIT: i64 = 20;
pub const DEFAULT_TAGS_LIMIT: i64 = 10;
pub const DEFAULT_SEARCH_LIMIT: i64 = 20;

/// Limit/offset window, always within bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Clamp `limit` to `[1, MAX_LIMIT]` and `offset` to `>= 0`
    pub fn new(limit: Option<i64>, offset: Option<i64>, default_limit: i64) -> Self {
        Self {
            limit: limit.unwrap_or(default_limit).clamp(1, MAX_LIMIT),
            offset: offset.unwrap_or(0).max(0),
        }
    }

    pub fn first(limit: Option<i64>, default_limit: i64) -> Self {
        Self::new(limit, None, default_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_bounds() {
        assert_eq!(Page::new(None, None, 50), Page { limit: 50, offset: 0 });
        assert_eq!(Page::new(Some(0), Some(-3), 50), Page { limit: 1, offset: 0 });
        assert_eq!(Page::new(Some(1_000), Some(7), 50), Page { limit: 100, offset: 7 });
    }
}
