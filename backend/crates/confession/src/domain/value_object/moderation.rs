//! Stored outcome of a moderation check

use crate::domain::gateway::ModerationVerdict;

/// Moderation state of a confession
///
/// `approved` is the only gate the board looks at, together with
/// `service_failed`: a confession is hidden only when a successful check
/// disapproved it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationRecord {
    pub approved: bool,
    pub flagged: bool,
    /// A moderation service actually looked at the content
    pub reviewed: bool,
    pub service_failed: bool,
    /// Writing suggestion returned alongside the verdict
    pub enhancement: Option<String>,
}

impl ModerationRecord {
    /// Record a successful check
    pub fn from_verdict(verdict: ModerationVerdict) -> Self {
        Self {
            approved: verdict.approved && !verdict.flagged,
            flagged: verdict.flagged,
            reviewed: true,
            service_failed: false,
            enhancement: verdict.enhancement.filter(|e| !e.trim().is_empty()),
        }
    }

    /// Record a check that could not be completed
    pub fn failure_open() -> Self {
        Self {
            approved: true,
            flagged: false,
            reviewed: false,
            service_failed: true,
            enhancement: None,
        }
    }

    /// Whether the confession may appear in public listings
    pub fn allows_listing(&self) -> bool {
        self.approved || self.service_failed
    }
}
