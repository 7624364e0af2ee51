//! stockwatch: stock symbol search, a persistent watchlist and price
//! history screens.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`], and the text screens that tie
//! them together in [`screens`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;
pub mod screens;
pub mod session;
