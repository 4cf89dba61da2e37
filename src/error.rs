//! Error types shared across the board, storage and front ends.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures reading or writing the key-value store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("stored value under '{key}' is malformed: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("stored id under '{key}' leaves no room for new ids")]
    IdsExhausted { key: String },
    #[error("failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Top-level error for commands and the terminal front end.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("no task with id {0}")]
    NotFound(String),
    #[error("{0}")]
    Rejected(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
