//! Topic tags
//!
//! Tags are canonicalised before storage so `#Work`, `work` and `ｗｏｒｋ`
//! all land on the same key: NFKC, trim, strip leading `#`, lowercase.

use unicode_normalization::UnicodeNormalization;

use super::ValidationError;

pub const MAX_TAGS: usize = 10;
pub const MAX_TAG_CHARS: usize = 32;

/// Canonical form of one tag, or `None` if nothing is left
pub fn canonical_tag(raw: &str) -> Option<String> {
    let normalized: String = raw.nfkc().collect();
    let tag = normalized.trim().trim_start_matches('#').trim().to_lowercase();
    (!tag.is_empty()).then_some(tag)
}

/// Ordered, de-duplicated tag set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(Vec<String>);

impl Tags {
    pub fn new<I, S>(raw: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tags: Vec<String> = Vec::new();
        for tag in raw.into_iter().filter_map(|t| canonical_tag(t.as_ref())) {
            if tag.chars().count() > MAX_TAG_CHARS {
                return Err(ValidationError::TagTooLong {
                    tag,
                    max: MAX_TAG_CHARS,
                });
            }
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        if tags.len() > MAX_TAGS {
            return Err(ValidationError::TooManyTags { max: MAX_TAGS });
        }
        Ok(Self(tags))
    }

    pub(crate) fn from_stored(tags: Vec<String>) -> Self {
        Self(tags)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalises_and_dedupes() {
        let tags = Tags::new(["#Work", "work", " ＷＯＲＫ ", "Life", ""]).unwrap();
        assert_eq!(tags.as_slice(), ["work", "life"]);
    }

    #[test]
    fn rejects_too_many() {
        let raw: Vec<String> = (0..=MAX_TAGS).map(|i| format!("t{i}")).collect();
        assert_eq!(
            Tags::new(&raw),
            Err(ValidationError::TooManyTags { max: MAX_TAGS })
        );
    }

    #[test]
    fn duplicates_do_not_count_against_limit() {
        let raw = vec!["same"; MAX_TAGS + 5];
        assert_eq!(Tags::new(raw).unwrap().as_slice().len(), 1);
    }

    #[test]
    fn rejects_long_tag() {
        let long = "x".repeat(MAX_TAG_CHARS + 1);
        assert!(matches!(
            Tags::new([long]),
            Err(ValidationError::TagTooLong { .. })
        ));
    }

    #[test]
    fn canonical_tag_of_only_hash_is_none() {
        assert_eq!(canonical_tag("#"), None);
        assert_eq!(canonical_tag(" # Rust "), Some("rust".to_string()));
    }
}
