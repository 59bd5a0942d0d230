use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {var}: {reason}")]
    Env { var: String, reason: String },

    #[error("Invalid configuration: {}", .0.join(", "))]
    Validation(Vec<String>),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Keystore(#[from] keystore::KeystoreError),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Transaction build failed: {0}")]
    TransactionBuild(String),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {method}")]
    HttpStatus { method: String, status: u16 },

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Unexpected RPC response to {method}: {reason}")]
    InvalidResponse { method: String, reason: String },

    #[error("Transaction {signature} failed: {reason}")]
    TransactionFailed { signature: String, reason: String },

    #[error("Transaction {signature} not confirmed within {timeout_secs} seconds")]
    ConfirmationTimeout { signature: String, timeout_secs: u64 },
}

impl From<chain_sol::SolError> for ClientError {
    fn from(e: chain_sol::SolError) -> Self {
        match e {
            chain_sol::SolError::InvalidAddress(msg) => ClientError::InvalidAddress(msg),
            chain_sol::SolError::InvalidArgument(msg) => ClientError::InvalidArgument(msg),
            other => ClientError::TransactionBuild(other.to_string()),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
