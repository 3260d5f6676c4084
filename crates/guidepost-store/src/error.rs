//! Error types for the storage layer.

use std::path::PathBuf;

use guidepost_protocol::ProtocolError;

/// Errors that can occur while reading or writing the document file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The file exists but couldn't be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Creating, writing, syncing, or renaming the file failed.
    #[error("failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but isn't a valid navigation document.
    #[error("failed to decode {}: {source}", path.display())]
    DecodeFailed {
        path: PathBuf,
        #[source]
        source: ProtocolError,
    },
}
