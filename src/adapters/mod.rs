//! Concrete adapter implementations for ports.

pub mod console_notice;
pub mod file_config_adapter;
pub mod http_adapter;
pub mod sqlite_adapter;
