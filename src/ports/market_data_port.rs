//! Remote listing service port.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};

use crate::domain::error::StockwatchError;
use crate::domain::history::HistoryRecord;
use crate::domain::listing::ListingEntry;

pub type HistoryResult = Result<Vec<HistoryRecord>, StockwatchError>;

#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Every tradable symbol.
    async fn list_all(&self) -> Result<Vec<ListingEntry>, StockwatchError>;

    /// Daily records for one symbol, most recent first.
    async fn history(&self, symbol: &str) -> HistoryResult;

    /// History for several symbols, at most `limit` requests in flight.
    ///
    /// Results come back in completion order, paired with their symbol.
    /// Adapters whose API accepts a symbol set in one request should
    /// override this.
    async fn history_batch(
        &self,
        symbols: &[String],
        limit: usize,
    ) -> Vec<(String, HistoryResult)> {
        stream::iter(symbols.iter().cloned())
            .map(|symbol| async move {
                let result = self.history(&symbol).await;
                (symbol, result)
            })
            .buffer_unordered(limit.max(1))
            .collect()
            .await
    }
}
