use std::io;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error {0}")]
    Io(io::ErrorKind),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Interface counters error: {0}")]
    Counters(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Request head too large: {size} bytes (max: {max})")]
    RequestTooLarge {
        size: usize,
        max: usize,
    },

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("JoinError: {0}")]
    JoinError(JoinError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<io::Error> for DashError {
    fn from(err: io::Error) -> Self {
        DashError::Io(err.kind())
    }
}

impl From<JoinError> for DashError {
    fn from(err: JoinError) -> Self {
        DashError::JoinError(err)
    }
}

impl From<config::ConfigError> for DashError {
    fn from(err: config::ConfigError) -> Self {
        DashError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for DashError {
    fn from(err: serde_json::Error) -> Self {
        DashError::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DashError>;
