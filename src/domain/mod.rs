//! Core domain types and logic.

pub mod error;
pub mod history;
pub mod listing;
pub mod settings;
pub mod watchlist;
