//! Search screen: the full listing filtered by free text.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::error::StockwatchError;
use crate::domain::listing::{ListingEntry, filter_listing, find_symbol};
use crate::domain::watchlist::{AddOutcome, WatchlistStore};
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::notice_port::{Notice, NoticePort};

pub struct SearchView {
    market: Arc<dyn MarketDataPort>,
    notices: Arc<dyn NoticePort>,
    listing: Vec<ListingEntry>,
    mount_failure: Option<String>,
    query: String,
}

impl SearchView {
    pub fn new(market: Arc<dyn MarketDataPort>, notices: Arc<dyn NoticePort>) -> Self {
        Self {
            market,
            notices,
            listing: Vec::new(),
            mount_failure: None,
            query: String::new(),
        }
    }

    /// Fetches the listing. On failure the listing is left empty and the
    /// user is told to check their connection; there is no retry.
    pub async fn mount(&mut self) -> Result<usize, StockwatchError> {
        self.listing.clear();
        self.mount_failure = None;
        match self.market.list_all().await {
            Ok(listing) => {
                debug!(count = listing.len(), "search screen mounted");
                self.listing = listing;
                Ok(self.listing.len())
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch listing");
                self.notices.notify(&Notice::network());
                self.mount_failure = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn set_query(&mut self, text: &str) {
        self.query = text.to_string();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn listing(&self) -> &[ListingEntry] {
        &self.listing
    }

    /// Whether the last mount failed to fetch the listing.
    pub fn is_unavailable(&self) -> bool {
        self.mount_failure.is_some()
    }

    pub fn results(&self) -> Vec<&ListingEntry> {
        filter_listing(&self.listing, &self.query)
    }

    /// Adds the listed entry for `symbol` to the watchlist and returns the
    /// symbol as the listing spells it.
    pub async fn select(
        &self,
        symbol: &str,
        store: &mut WatchlistStore,
    ) -> Result<(String, AddOutcome), StockwatchError> {
        self.ensure_available()?;
        let entry = find_symbol(&self.listing, symbol).ok_or_else(|| StockwatchError::NotListed {
            symbol: symbol.trim().to_string(),
        })?;
        let outcome = store.add(&entry.symbol).await;
        Ok((entry.symbol.clone(), outcome))
    }

    /// Adds the `n`-th (1-based) current result to the watchlist.
    pub async fn select_index(
        &self,
        n: usize,
        store: &mut WatchlistStore,
    ) -> Result<(String, AddOutcome), StockwatchError> {
        self.ensure_available()?;
        let symbol = n
            .checked_sub(1)
            .and_then(|i| self.results().get(i).map(|entry| entry.symbol.clone()))
            .ok_or_else(|| StockwatchError::NotListed {
                symbol: format!("result #{n}"),
            })?;
        let outcome = store.add(&symbol).await;
        Ok((symbol, outcome))
    }

    fn ensure_available(&self) -> Result<(), StockwatchError> {
        match &self.mount_failure {
            Some(reason) => Err(StockwatchError::ListingUnavailable {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}
