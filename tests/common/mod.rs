#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use stockwatch::cli::App;
use stockwatch::domain::error::StockwatchError;
pub use stockwatch::domain::history::HistoryRecord;
pub use stockwatch::domain::listing::ListingEntry;
use stockwatch::domain::settings::Settings;
use stockwatch::domain::watchlist::{DEFAULT_STORAGE_KEY, WatchlistStore};
use stockwatch::ports::market_data_port::{HistoryResult, MarketDataPort};
use stockwatch::ports::notice_port::{Notice, NoticePort};
use stockwatch::ports::storage_port::StoragePort;

#[derive(Default)]
pub struct MemoryStorage {
    pub values: Mutex<HashMap<String, String>>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub writes: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(self, key: &str, value: &str) -> Self {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StoragePort for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StockwatchError> {
        if self.fail_reads {
            return Err(StockwatchError::StorageRead {
                key: key.to_string(),
                reason: "disk unavailable".into(),
            });
        }
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StockwatchError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(StockwatchError::StorageWrite {
                key: key.to_string(),
                reason: "disk full".into(),
            });
        }
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct MockMarketData {
    pub listing: Vec<ListingEntry>,
    pub listing_error: bool,
    pub history: HashMap<String, Vec<HistoryRecord>>,
    pub errors: HashMap<String, u16>,
    pub list_calls: AtomicUsize,
    pub history_calls: Mutex<Vec<String>>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(mut self, entries: &[(&str, &str)]) -> Self {
        self.listing = entries
            .iter()
            .map(|(symbol, name)| ListingEntry::new(*symbol, *name))
            .collect();
        self
    }

    pub fn with_listing_error(mut self) -> Self {
        self.listing_error = true;
        self
    }

    pub fn with_history(mut self, symbol: &str, records: Vec<HistoryRecord>) -> Self {
        self.history.insert(symbol.to_string(), records);
        self
    }

    pub fn with_error(mut self, symbol: &str, status: u16) -> Self {
        self.errors.insert(symbol.to_string(), status);
        self
    }

    pub fn history_calls(&self) -> Vec<String> {
        self.history_calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, symbol: &str) -> usize {
        self.history_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|s| *s == symbol)
            .count()
    }
}

#[async_trait]
impl MarketDataPort for MockMarketData {
    async fn list_all(&self) -> Result<Vec<ListingEntry>, StockwatchError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.listing_error {
            return Err(StockwatchError::HttpStatus {
                url: "mock://all".into(),
                status: 502,
            });
        }
        Ok(self.listing.clone())
    }

    async fn history(&self, symbol: &str) -> HistoryResult {
        self.history_calls.lock().unwrap().push(symbol.to_string());
        if let Some(status) = self.errors.get(symbol) {
            return Err(StockwatchError::HttpStatus {
                url: format!("mock://history?symbol={symbol}"),
                status: *status,
            });
        }
        Ok(self.history.get(symbol).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.all().into_iter().map(|n| n.title).collect()
    }
}

impl NoticePort for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}

pub fn record(symbol: &str, open: f64, close: f64) -> HistoryRecord {
    HistoryRecord {
        symbol: symbol.to_string(),
        name: Some(format!("{symbol} Corp")),
        timestamp: None,
        open,
        close,
        high: open.max(close) + 1.0,
        low: open.min(close) - 1.0,
        volumes: 10_000,
    }
}

pub fn sample_listing() -> Vec<(&'static str, &'static str)> {
    vec![
        ("AAPL", "Apple"),
        ("MSFT", "Microsoft"),
        ("GOOG", "Alphabet"),
        ("AAL", "American Airlines Group"),
    ]
}

pub fn sample_market() -> MockMarketData {
    MockMarketData::new()
        .with_listing(&sample_listing())
        .with_history("AAPL", vec![record("AAPL", 100.0, 110.0), record("AAPL", 90.0, 95.0)])
        .with_history("MSFT", vec![record("MSFT", 50.0, 45.0)])
        .with_history("GOOG", vec![record("GOOG", 200.0, 200.0)])
        .with_history("AAL", vec![record("AAL", 11.17, 10.64)])
}

pub fn new_store(
    storage: Arc<MemoryStorage>,
    notices: Arc<RecordingNotifier>,
) -> WatchlistStore {
    WatchlistStore::new(storage, notices, DEFAULT_STORAGE_KEY)
}

pub struct TestApp {
    pub app: App,
    pub storage: Arc<MemoryStorage>,
    pub market: Arc<MockMarketData>,
    pub notices: Arc<RecordingNotifier>,
}

pub fn test_app(storage: MemoryStorage, market: MockMarketData) -> TestApp {
    let storage = Arc::new(storage);
    let market = Arc::new(market);
    let notices = Arc::new(RecordingNotifier::default());
    let app = App::new(
        Settings::default(),
        storage.clone(),
        market.clone(),
        notices.clone(),
    );
    TestApp {
        app,
        storage,
        market,
        notices,
    }
}
