//! Daily history records and percent gain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::error::StockwatchError;

/// One day's OHLCV snapshot for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub volumes: u64,
}

impl HistoryRecord {
    /// Session return of this record.
    pub fn percent_gain(&self) -> Option<PercentGain> {
        PercentGain::compute(self.open, self.close)
    }

    /// Name for display, falling back to the symbol.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.symbol)
    }
}

/// Takes the "current" record: the history endpoint lists newest first.
pub fn latest_record(
    symbol: &str,
    records: Vec<HistoryRecord>,
) -> Result<HistoryRecord, StockwatchError> {
    records
        .into_iter()
        .next()
        .ok_or_else(|| StockwatchError::EmptyHistory {
            symbol: symbol.to_string(),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

/// (close - open) / open * 100, displayed with two decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentGain(f64);

impl PercentGain {
    /// `None` when `open` is zero or the result is not finite.
    pub fn compute(open: f64, close: f64) -> Option<Self> {
        if open == 0.0 {
            return None;
        }
        let gain = (close - open) / open * 100.0;
        gain.is_finite().then_some(Self(gain))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Zero counts as a gain.
    pub fn trend(self) -> Trend {
        if self.0 >= 0.0 { Trend::Up } else { Trend::Down }
    }
}

impl fmt::Display for PercentGain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
