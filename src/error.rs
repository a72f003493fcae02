use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures reading or writing the settings store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cannot read storage file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write storage file {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("storage file {} is not a JSON object: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("cannot serialize storage contents: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failures parsing or replacing the current address.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("not an absolute URL: {0}")]
    Invalid(String),

    #[error("cannot replace {current} with a URL from another origin: {requested}")]
    CrossOrigin { current: String, requested: String },
}

/// Failures writing to the system clipboard.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("terminal rejected clipboard write: {0}")]
    Io(#[from] io::Error),
}
