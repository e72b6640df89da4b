//! Null book store implementation.
//!
//! Stands in for the real store when the host has no usable local storage.
//! Every operation fails with [`BookStoreError::StorageUnavailable`], so a
//! collection built on it degrades to an in-memory-only session.

use super::error::{BookStoreError, Result};
use super::models::{Book, BookId};
use super::BookStore;
use async_trait::async_trait;

pub struct NullBookStore {
    reason: String,
}

impl NullBookStore {
    pub fn new<S: Into<String>>(reason: S) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn unavailable(&self) -> BookStoreError {
        BookStoreError::StorageUnavailable(self.reason.clone())
    }
}

#[async_trait]
impl BookStore for NullBookStore {
    async fn open(&self) -> Result<()> {
        Err(self.unavailable())
    }

    async fn load_all(&self) -> Result<Vec<Book>> {
        Err(self.unavailable())
    }

    async fn load_by_author(&self, _author: &str) -> Result<Vec<Book>> {
        Err(self.unavailable())
    }

    async fn put(&self, _book: &Book) -> Result<()> {
        Err(self.unavailable())
    }

    async fn delete(&self, _id: &BookId) -> Result<()> {
        Err(self.unavailable())
    }
}
