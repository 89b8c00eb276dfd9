//! Error types

use thiserror::Error;

/// Main error type for Team Pulse
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Sheets API error: {0}")]
    Sheets(String),

    #[error("Notification error: {0}")]
    Notify(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
