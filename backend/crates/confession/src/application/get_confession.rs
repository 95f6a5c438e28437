use std::sync::Arc;

use crate::domain::entity::Confession;
use crate::domain::repository::ConfessionRepository;
use crate::error::{ConfessionError, ConfessionResult};

/// Lookup by upload transaction id
pub struct GetConfessionUseCase<C>
where
    C: ConfessionRepository,
{
    confession_repo: Arc<C>,
}

impl<C> GetConfessionUseCase<C>
where
    C: ConfessionRepository,
{
    pub fn new(confession_repo: Arc<C>) -> Self {
        Self { confession_repo }
    }

    pub async fn execute(&self, tx_id: &str) -> ConfessionResult<Confession> {
        let tx_id = tx_id.trim();
        if tx_id.is_empty() {
            return Err(ConfessionError::ConfessionNotFound);
        }
        self.confession_repo
            .find_by_tx_id(tx_id)
            .await?
            .ok_or(ConfessionError::ConfessionNotFound)
    }
}
