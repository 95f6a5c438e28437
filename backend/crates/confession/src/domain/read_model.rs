//! Aggregates computed at read time

use serde::Serialize;

use crate::domain::value_object::Mood;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodCount {
    pub mood: Mood,
    pub count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecentActivity {
    pub confessions: i64,
    pub replies: i64,
    pub new_users: i64,
}

/// Point-in-time board counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardStats {
    pub total_confessions: i64,
    pub public_confessions: i64,
    pub total_users: i64,
    pub total_replies: i64,
    /// Listed confessions per mood, most frequent first
    pub mood_distribution: Vec<MoodCount>,
    pub last_24h: RecentActivity,
}
