//! Watchlist screen: one row per watched symbol plus a detail panel.
//!
//! Fetches happen only when the symbol set changes ([`WatchlistView::sync`])
//! or on an explicit user action ([`WatchlistView::refresh`],
//! [`WatchlistView::select`]). Rendering reads state and never fetches.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::error::StockwatchError;
use crate::domain::history::{HistoryRecord, PercentGain, latest_record};
use crate::domain::watchlist::WatchlistStore;
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::notice_port::{Notice, NoticePort};

#[derive(Debug, Clone, PartialEq)]
pub enum RowState {
    Loading,
    Loaded(HistoryRecord),
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WatchlistRow {
    pub symbol: String,
    pub state: RowState,
}

impl WatchlistRow {
    fn loading(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            state: RowState::Loading,
        }
    }

    pub fn record(&self) -> Option<&HistoryRecord> {
        match &self.state {
            RowState::Loaded(record) => Some(record),
            _ => None,
        }
    }

    pub fn percent_gain(&self) -> Option<PercentGain> {
        self.record().and_then(HistoryRecord::percent_gain)
    }
}

pub struct WatchlistView {
    market: Arc<dyn MarketDataPort>,
    notices: Arc<dyn NoticePort>,
    max_concurrent: usize,
    rows: Vec<WatchlistRow>,
    selected: Option<String>,
    detail: Option<HistoryRecord>,
}

impl WatchlistView {
    pub fn new(
        market: Arc<dyn MarketDataPort>,
        notices: Arc<dyn NoticePort>,
        max_concurrent: usize,
    ) -> Self {
        Self {
            market,
            notices,
            max_concurrent: max_concurrent.max(1),
            rows: Vec::new(),
            selected: None,
            detail: None,
        }
    }

    /// Aligns rows with the store and fetches only the new symbols.
    /// A symbol stored more than once gets a single row.
    ///
    /// Returns how many symbols were fetched.
    pub async fn sync(&mut self, store: &WatchlistStore) -> usize {
        let mut existing: HashMap<String, WatchlistRow> = self
            .rows
            .drain(..)
            .map(|row| (row.symbol.clone(), row))
            .collect();

        let mut missing = Vec::new();
        for symbol in distinct(store.symbols()) {
            match existing.remove(symbol) {
                Some(row) => self.rows.push(row),
                None => {
                    self.rows.push(WatchlistRow::loading(symbol));
                    missing.push(symbol.clone());
                }
            }
        }

        if store.is_empty()
            || self
                .selected
                .as_ref()
                .is_some_and(|s| !store.contains(s))
        {
            self.clear_selection();
        }

        let fetched = missing.len();
        self.fetch_rows(missing).await;
        fetched
    }

    /// Re-fetches every row.
    pub async fn refresh(&mut self, store: &WatchlistStore) -> usize {
        let symbols: Vec<String> = distinct(store.symbols()).cloned().collect();
        self.rows = symbols.iter().map(|s| WatchlistRow::loading(s)).collect();
        let fetched = symbols.len();
        self.fetch_rows(symbols).await;
        fetched
    }

    /// Loads the detail panel for `symbol`. Every call fetches.
    ///
    /// On failure the previous panel stays in place.
    pub async fn select(&mut self, symbol: &str) -> Result<&HistoryRecord, StockwatchError> {
        let fetched = self
            .market
            .history(symbol)
            .await
            .and_then(|records| latest_record(symbol, records));

        match fetched {
            Ok(record) => {
                self.selected = Some(symbol.to_string());
                let record: &HistoryRecord = self.detail.insert(record);
                Ok(record)
            }
            Err(e) => {
                warn!(symbol, error = %e, "failed to load detail");
                self.notices.notify(&Notice::network());
                Err(e)
            }
        }
    }

    /// Removes `symbol` from the store and from the screen. The text is
    /// matched against the stored symbols ignoring case.
    pub async fn remove(&mut self, symbol: &str, store: &mut WatchlistStore) -> usize {
        let symbol = store.resolve(symbol).unwrap_or(symbol.trim()).to_string();
        let removed = store.remove(&symbol).await;
        self.rows.retain(|row| row.symbol != symbol);
        if store.is_empty() || self.selected.as_deref() == Some(symbol.as_str()) {
            self.clear_selection();
        }
        removed
    }

    pub fn rows(&self) -> &[WatchlistRow] {
        &self.rows
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn detail(&self) -> Option<&HistoryRecord> {
        self.detail.as_ref()
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.detail = None;
    }

    async fn fetch_rows(&mut self, symbols: Vec<String>) {
        if symbols.is_empty() {
            return;
        }
        debug!(count = symbols.len(), limit = self.max_concurrent, "fetching rows");

        let results = self
            .market
            .history_batch(&symbols, self.max_concurrent)
            .await;

        let mut failed = Vec::new();
        for (symbol, result) in results {
            let state = match result.and_then(|records| latest_record(&symbol, records)) {
                Ok(record) => RowState::Loaded(record),
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "failed to load row");
                    failed.push(symbol.clone());
                    RowState::Failed
                }
            };
            if let Some(row) = self.rows.iter_mut().find(|row| row.symbol == symbol) {
                row.state = state;
            }
        }

        if !failed.is_empty() {
            failed.sort();
            self.notices.notify(&Notice::new(
                "Network Error",
                format!(
                    "Could not load {}. Please check your network connection",
                    failed.join(", ")
                ),
            ));
        }
    }
}

fn distinct(symbols: &[String]) -> impl Iterator<Item = &String> {
    let mut seen = HashSet::new();
    symbols.iter().filter(move |s| seen.insert(s.as_str()))
}
