//! Port traits for the collaborators outside the domain.

pub mod config_port;
pub mod market_data_port;
pub mod notice_port;
pub mod storage_port;
