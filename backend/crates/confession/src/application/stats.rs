use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::read_model::BoardStats;
use crate::domain::repository::StatsRepository;
use crate::error::ConfessionResult;

/// Board statistics, counted at request time
pub struct StatsUseCase<S>
where
    S: StatsRepository,
{
    stats_repo: Arc<S>,
}

impl<S> StatsUseCase<S>
where
    S: StatsRepository,
{
    pub fn new(stats_repo: Arc<S>) -> Self {
        Self { stats_repo }
    }

    pub async fn execute(&self) -> ConfessionResult<BoardStats> {
        let since = Utc::now() - Duration::hours(24);
        self.stats_repo.board_stats(since).await
    }
}
