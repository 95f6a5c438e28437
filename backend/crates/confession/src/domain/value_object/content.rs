//! Post body shared by confessions and replies

use super::ValidationError;

/// Maximum length in Unicode scalar values
pub const MAX_CONTENT_CHARS: usize = 280;

/// Validated post text
///
/// The text is stored exactly as submitted; only the emptiness check looks
/// at the trimmed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content(String);

impl Content {
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ValidationError::EmptyContent);
        }

        let actual = raw.chars().count();
        if actual > MAX_CONTENT_CHARS {
            return Err(ValidationError::ContentTooLong {
                max: MAX_CONTENT_CHARS,
                actual,
            });
        }

        Ok(Self(raw))
    }

    /// Rebuild from a stored row without re-validating
    pub(crate) fn from_stored(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
