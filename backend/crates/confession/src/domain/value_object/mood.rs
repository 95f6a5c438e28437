use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Anxious,
    Angry,
    Excited,
    Frustrated,
    Hopeful,
    Neutral,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Anxious,
        Mood::Angry,
        Mood::Excited,
        Mood::Frustrated,
        Mood::Hopeful,
        Mood::Neutral,
    ];

    #[inline]
    pub const fn code(&self) -> &'static str {
        use Mood::*;
        match self {
            Happy => "happy",
            Sad => "sad",
            Anxious => "anxious",
            Angry => "angry",
            Excited => "excited",
            Frustrated => "frustrated",
            Hopeful => "hopeful",
            Neutral => "neutral",
        }
    }

    /// Parse an optional mood field; blank counts as absent
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<Self>, ValidationError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(code) => code.parse().map(Some),
        }
    }
}

impl FromStr for Mood {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.code() == lowered)
            .ok_or_else(|| ValidationError::UnknownMood(s.to_string()))
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
