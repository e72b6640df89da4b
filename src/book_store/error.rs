//! Error taxonomy of the book store.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookStoreError {
    /// The host offers no usable local storage; the session runs in memory only.
    #[error("Local storage is not available: {0}")]
    StorageUnavailable(String),

    #[error("Failed to open book database: {0}")]
    OpenFailed(String),

    /// Another connection holds a lock that prevents the schema upgrade.
    #[error("Upgrade of book database to version {target_version} was blocked: {reason}")]
    UpgradeBlocked {
        target_version: usize,
        reason: String,
    },

    #[error("Failed to read books: {0}")]
    ReadFailed(String),

    #[error("Failed to write book: {0}")]
    WriteFailed(String),
}

impl BookStoreError {
    /// Errors raised while establishing the connection, as opposed to the
    /// transaction that follows it.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            BookStoreError::StorageUnavailable(_)
                | BookStoreError::OpenFailed(_)
                | BookStoreError::UpgradeBlocked { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BookStoreError>;
