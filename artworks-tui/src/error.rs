//! Application error type.

use thiserror::Error;

/// Errors that end the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error("client error: {0}")]
    Client(#[from] artworks_lib::error::Error),

    #[error("logging error: {0}")]
    Logging(#[from] log::SetLoggerError),
}
