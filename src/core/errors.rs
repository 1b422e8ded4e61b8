use crate::core::types::ExchangeName;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Exchange {0} is not supported")]
    UnsupportedProvider(String),

    #[error("Exchange {0} is not added")]
    ExchangeNotAdded(ExchangeName),

    #[error("No exchange configured")]
    NoExchangeConfigured,

    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        Self::TransportFailure(err.to_string())
    }
}
