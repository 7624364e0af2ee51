//! Plain-text rendering of the screens.

use std::fmt::Write;

use crate::domain::history::{HistoryRecord, Trend};
use crate::domain::listing::ListingEntry;

use super::watchlist::{RowState, WatchlistView};

pub fn search_results(results: &[&ListingEntry]) -> String {
    if results.is_empty() {
        return String::from("No matching symbols\n");
    }
    let mut out = String::new();
    for (i, entry) in results.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {:<8} {}", i + 1, entry.symbol, entry.name);
    }
    out
}

pub fn watchlist(view: &WatchlistView) -> String {
    if view.rows().is_empty() {
        return String::from("Your watchlist is empty\n");
    }

    let mut out = String::new();
    for row in view.rows() {
        let marker = if view.selected() == Some(row.symbol.as_str()) {
            '>'
        } else {
            ' '
        };
        let _ = match &row.state {
            RowState::Loading => writeln!(out, "{marker} {:<8} {:>10}", row.symbol, "…"),
            RowState::Failed => writeln!(out, "{marker} {:<8} {:>10}", row.symbol, "unavailable"),
            RowState::Loaded(record) => {
                let (gain, trend) = match record.percent_gain() {
                    Some(g) => (
                        format!("{g}%"),
                        match g.trend() {
                            Trend::Up => '+',
                            Trend::Down => '-',
                        },
                    ),
                    None => (String::from("n/a"), ' '),
                };
                writeln!(
                    out,
                    "{marker} {:<8} {:>10.2} {:>9} {trend}",
                    row.symbol, record.close, gain
                )
            }
        };
    }
    out
}

pub fn detail(record: &HistoryRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", record.display_name());
    let _ = writeln!(
        out,
        "OPEN   {:>12.2}   LOW    {:>12.2}",
        record.open, record.low
    );
    let _ = writeln!(
        out,
        "CLOSE  {:>12.2}   HIGH   {:>12.2}",
        record.close, record.high
    );
    let _ = writeln!(out, "VOLUME {:>12}", record.volumes);
    if let Some(ts) = record.timestamp {
        let _ = writeln!(out, "DATE   {:>12}", ts.format("%Y-%m-%d").to_string());
    }
    out
}
