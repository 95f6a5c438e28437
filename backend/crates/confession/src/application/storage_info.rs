//! Storage network information and funding wallet status

use std::sync::Arc;

use crate::application::config::{ConfessionConfig, NetworkInfo};
use crate::domain::gateway::{UploadGateway, WalletBalance};
use crate::error::ConfessionResult;

pub struct StorageInfoUseCase<G>
where
    G: UploadGateway,
{
    gateway: Arc<G>,
    config: Arc<ConfessionConfig>,
}

impl<G> StorageInfoUseCase<G>
where
    G: UploadGateway,
{
    pub fn new(gateway: Arc<G>, config: Arc<ConfessionConfig>) -> Self {
        Self { gateway, config }
    }

    pub fn network(&self) -> NetworkInfo {
        self.config.network.clone()
    }

    pub async fn balance(&self) -> ConfessionResult<WalletBalance> {
        Ok(self.gateway.balance().await?)
    }

    pub async fn address(&self) -> ConfessionResult<String> {
        Ok(self.gateway.address().await?)
    }
}
