use std::path::PathBuf;

use thiserror::Error;

pub type HistoryResult<T> = Result<T, HistoryError>;

#[derive(Debug, Error)]
pub enum HistoryError {
    /// The store location could not be created, opened or locked.
    #[error("history store at {} is unavailable", path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A mutating transaction failed and was rolled back.
    #[error("failed to write history")]
    StorageWrite(#[source] rusqlite::Error),

    #[error("failed to read history")]
    StorageRead(#[source] rusqlite::Error),

    #[error("no entries to delete")]
    NotFound,

    #[error("history store is closed")]
    NotOpen,

    /// A stored record could not be decoded. Only raised by the per-record
    /// decoder; readers log it and move on.
    #[error("skipped undecodable history record {key:02x?}: {reason}")]
    DecodeSkipped { key: Vec<u8>, reason: String },
}

impl HistoryError {
    pub(crate) fn unavailable(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        HistoryError::StorageUnavailable {
            path: path.into(),
            source: source.into(),
        }
    }
}
