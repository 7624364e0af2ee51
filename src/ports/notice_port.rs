//! User-facing notice port.

use std::fmt;

/// An alert shown to the user: a short title and a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn corrupt_watchlist() -> Self {
        Self::new("Disk corrupted", "Watchlist not updated")
    }

    pub fn duplicate(symbol: &str) -> Self {
        Self::new("Hold up", format!("{symbol} is already on your watchlist"))
    }

    pub fn network() -> Self {
        Self::new("Network Error", "Please check your network connection")
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

pub trait NoticePort: Send + Sync {
    fn notify(&self, notice: &Notice);
}
