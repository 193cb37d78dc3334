//! Error types for the store layer.

use std::path::PathBuf;

/// Errors that can occur while writing to a key-value backend.
///
/// Reads never produce a `StoreError`: a backend that can't answer a
/// read reports the key as absent instead. Only writes (set, remove,
/// clear) surface failures, and callers in the session layer log them
/// rather than propagating them into shell selection.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend is switched off (e.g. storage disabled by policy).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing the backing file failed.
    #[error("storage file {path} failed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A structured value couldn't be serialized for storage.
    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),
}
