//! Text screens over the watchlist store and the remote listing service.

pub mod render;
pub mod search;
pub mod watchlist;

pub use search::SearchView;
pub use watchlist::{RowState, WatchlistRow, WatchlistView};
