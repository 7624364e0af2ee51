//! Watchlist store.
//!
//! Holds the user's ordered list of symbols in memory and writes the whole
//! list back through the [`StoragePort`] on every mutation. The store is a
//! plain value passed to whichever screen needs it.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::error::StockwatchError;
use crate::ports::notice_port::{Notice, NoticePort};
use crate::ports::storage_port::StoragePort;

pub const DEFAULT_STORAGE_KEY: &str = "watchlist";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Duplicate,
}

pub struct WatchlistStore {
    storage: Arc<dyn StoragePort>,
    notices: Arc<dyn NoticePort>,
    key: String,
    symbols: Vec<String>,
    hydrated: bool,
}

impl WatchlistStore {
    pub fn new(
        storage: Arc<dyn StoragePort>,
        notices: Arc<dyn NoticePort>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            notices,
            key: key.into(),
            symbols: Vec::new(),
            hydrated: false,
        }
    }

    /// Loads the persisted list. Only the first call does anything.
    ///
    /// A read failure is logged and leaves the list empty. A value that is
    /// not a JSON array of strings raises a notice and also leaves the list
    /// empty.
    pub async fn hydrate(&mut self) {
        if self.hydrated {
            debug!(key = %self.key, "watchlist already hydrated");
            return;
        }
        self.hydrated = true;

        let raw = match self.storage.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no stored watchlist");
                return;
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read watchlist");
                return;
            }
        };

        match decode_symbols(&self.key, &raw) {
            Ok(symbols) => {
                debug!(key = %self.key, count = symbols.len(), "watchlist hydrated");
                self.symbols = symbols;
            }
            Err(e) => {
                warn!(error = %e, "watchlist not loaded");
                self.notices.notify(&Notice::corrupt_watchlist());
            }
        }
    }

    /// Appends `symbol` unless it is already present.
    pub async fn add(&mut self, symbol: &str) -> AddOutcome {
        if self.contains(symbol) {
            self.notices.notify(&Notice::duplicate(symbol));
            return AddOutcome::Duplicate;
        }
        self.symbols.push(symbol.to_string());
        self.persist().await;
        AddOutcome::Added
    }

    /// Removes every occurrence of `symbol` and returns how many went.
    ///
    /// The list is written back even when nothing was removed.
    pub async fn remove(&mut self, symbol: &str) -> usize {
        let before = self.symbols.len();
        self.symbols.retain(|s| s != symbol);
        let removed = before - self.symbols.len();
        self.persist().await;
        removed
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }

    /// The stored spelling of `text`: an exact match wins, otherwise the
    /// first case-insensitive one.
    pub fn resolve(&self, text: &str) -> Option<&str> {
        let text = text.trim();
        self.symbols
            .iter()
            .find(|s| *s == text)
            .or_else(|| self.symbols.iter().find(|s| s.eq_ignore_ascii_case(text)))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    // Write failures are not retried; memory stays ahead of storage until
    // the next successful write.
    async fn persist(&self) {
        let encoded = match serde_json::to_string(&self.symbols) {
            Ok(s) => s,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to encode watchlist");
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.key, &encoded).await {
            warn!(key = %self.key, error = %e, "failed to persist watchlist");
        }
    }
}

/// Parses the stored form: a JSON array of symbol strings.
fn decode_symbols(key: &str, raw: &str) -> Result<Vec<String>, StockwatchError> {
    serde_json::from_str(raw).map_err(|e| StockwatchError::CorruptWatchlist {
        key: key.to_string(),
        reason: e.to_string(),
    })
}
