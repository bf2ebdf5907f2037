//! Error handling for the explorer.

use thiserror::Error;

/// Main error type for the explorer
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON-RPC errors surfaced by the node client
    #[error("RPC error: {0}")]
    RpcError(#[from] web3::Error),

    /// Contract call errors (token queries)
    #[error("Contract error: {0}")]
    ContractError(#[from] web3::contract::Error),

    /// ABI parsing errors
    #[error("ABI error: {0}")]
    AbiError(#[from] web3::ethabi::Error),

    /// Malformed search or route parameters
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Blocks, transactions or accounts the chain does not know
    #[error("Not found: {0}")]
    NotFound(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML serialization/deserialization errors
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    /// Request errors
    #[error("Request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    /// URL parse errors
    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    /// Other errors
    #[error("Error: {0}")]
    Other(String),
}

/// Result type for the explorer
pub type Result<T> = std::result::Result<T, Error>;

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::Other(err)
    }
}
