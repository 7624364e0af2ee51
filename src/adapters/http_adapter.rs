//! HTTP adapter for the remote listing service.
//!
//! Two endpoints, both plain JSON over `GET`:
//! - `/all` lists every symbol as `{symbol, name}`
//! - `/history?symbol=<SYM>` lists daily records, newest first

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::error::StockwatchError;
use crate::domain::history::HistoryRecord;
use crate::domain::listing::ListingEntry;
use crate::domain::settings::Settings;
use crate::ports::market_data_port::{HistoryResult, MarketDataPort};

pub struct HttpMarketData {
    client: Client,
    base_url: String,
}

impl HttpMarketData {
    pub fn from_settings(settings: &Settings) -> Result<Self, StockwatchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| StockwatchError::Network {
            url: settings.base_url.clone(),
            reason: format!("failed to build HTTP client: {e}"),
        })?;

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, StockwatchError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, params = query.len(), "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| StockwatchError::Network {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StockwatchError::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| StockwatchError::Network {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&body).map_err(|e| StockwatchError::Decode {
            url,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl MarketDataPort for HttpMarketData {
    async fn list_all(&self) -> Result<Vec<ListingEntry>, StockwatchError> {
        let entries: Vec<ListingEntry> = self.get_json("/all", &[]).await?;
        debug!(count = entries.len(), "fetched listing");
        Ok(entries)
    }

    async fn history(&self, symbol: &str) -> HistoryResult {
        let records: Vec<HistoryRecord> =
            self.get_json("/history", &[("symbol", symbol)]).await?;
        debug!(symbol, count = records.len(), "fetched history");
        Ok(records)
    }
}
