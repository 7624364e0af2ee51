//! Key-value persistence port.

use async_trait::async_trait;

use crate::domain::error::StockwatchError;

/// On-device key-value store holding string values.
#[async_trait]
pub trait StoragePort: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StockwatchError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StockwatchError>;
}
