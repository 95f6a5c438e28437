use super::ValidationError;

pub const ANONYMOUS: &str = "anonymous";
pub const MAX_AUTHOR_CHARS: usize = 64;

/// Display label of whoever posted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author(String);

impl Author {
    /// Blank or missing labels become `anonymous`
    pub fn new(raw: Option<&str>) -> Result<Self, ValidationError> {
        let trimmed = raw.map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            return Ok(Self::anonymous());
        }
        if trimmed.chars().count() > MAX_AUTHOR_CHARS {
            return Err(ValidationError::AuthorTooLong {
                max: MAX_AUTHOR_CHARS,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn anonymous() -> Self {
        Self(ANONYMOUS.to_string())
    }

    pub(crate) fn from_stored(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_anonymous(&self) -> bool {
        self.0 == ANONYMOUS
    }
}

impl Default for Author {
    fn default() -> Self {
        Self::anonymous()
    }
}
