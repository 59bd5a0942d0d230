use std::path::PathBuf;

use thiserror::Error;

/// Keypair loading and generation errors.
#[derive(Debug, Error)]
pub enum KeystoreError {
    #[error("failed to read keypair from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse keypair file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("invalid keypair: {0}")]
    InvalidKeypair(String),

    #[error("cannot determine home directory")]
    NoHomeDir,
}
