//! Symbol listing entries and the search filter.

use serde::{Deserialize, Serialize};

/// One tradable symbol as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    pub symbol: String,
    pub name: String,
}

impl ListingEntry {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }

    /// Case-insensitive literal substring match on symbol or name.
    ///
    /// `needle` must already be lowercased.
    fn matches_lower(&self, needle: &str) -> bool {
        self.symbol.to_lowercase().contains(needle) || self.name.to_lowercase().contains(needle)
    }
}

/// Filters `listing` against free-text `query`.
///
/// The query is trimmed and matched literally; no character has pattern
/// meaning. An empty query matches nothing. Listing order is preserved.
pub fn filter_listing<'a>(listing: &'a [ListingEntry], query: &str) -> Vec<&'a ListingEntry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    listing
        .iter()
        .filter(|entry| entry.matches_lower(&needle))
        .collect()
}

/// Finds the entry whose symbol equals `symbol`, ignoring case and
/// surrounding whitespace.
pub fn find_symbol<'a>(listing: &'a [ListingEntry], symbol: &str) -> Option<&'a ListingEntry> {
    let wanted = symbol.trim();
    listing
        .iter()
        .find(|entry| entry.symbol.eq_ignore_ascii_case(wanted))
}
