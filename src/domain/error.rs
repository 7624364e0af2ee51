//! Domain error types.

/// Top-level error type for stockwatch.
#[derive(Debug, thiserror::Error)]
pub enum StockwatchError {
    #[error("storage error: {reason}")]
    Storage { reason: String },

    #[error("storage read failed for key {key}: {reason}")]
    StorageRead { key: String, reason: String },

    #[error("storage write failed for key {key}: {reason}")]
    StorageWrite { key: String, reason: String },

    #[error("stored watchlist under {key} is corrupt: {reason}")]
    CorruptWatchlist { key: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("could not decode response from {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("no history records for {symbol}")]
    EmptyHistory { symbol: String },

    #[error("{symbol} is not in the listing")]
    NotListed { symbol: String },

    #[error("the symbol listing could not be loaded ({reason}); check your network connection")]
    ListingUnavailable { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StockwatchError {
    /// True for failures of the remote listing service.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            StockwatchError::Network { .. }
                | StockwatchError::HttpStatus { .. }
                | StockwatchError::Decode { .. }
                | StockwatchError::EmptyHistory { .. }
                | StockwatchError::ListingUnavailable { .. }
        )
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            StockwatchError::Io(_) => 1,
            StockwatchError::ConfigParse { .. } | StockwatchError::ConfigInvalid { .. } => 2,
            StockwatchError::Storage { .. }
            | StockwatchError::StorageRead { .. }
            | StockwatchError::StorageWrite { .. }
            | StockwatchError::CorruptWatchlist { .. } => 3,
            StockwatchError::Network { .. }
            | StockwatchError::HttpStatus { .. }
            | StockwatchError::Decode { .. }
            | StockwatchError::EmptyHistory { .. }
            | StockwatchError::ListingUnavailable { .. } => 4,
            StockwatchError::NotListed { .. } => 5,
        }
    }
}

impl From<&StockwatchError> for std::process::ExitCode {
    fn from(err: &StockwatchError) -> Self {
        std::process::ExitCode::from(err.exit_code())
    }
}
