//! Durable storage of book records.

mod error;
mod models;
mod null_store;
mod schema;
mod sqlite_book_store;

pub use error::{BookStoreError, Result};
pub use models::{Book, BookDetails, BookId, DeliveryStatus, ForSaleStatus, SaveRequest};
pub use null_store::NullBookStore;
pub use schema::{AUTHOR_INDEX_NAME, BOOKS_SCHEMA_VERSION, BOOKS_VERSIONED_SCHEMAS};
pub use sqlite_book_store::{SqliteBookStore, DEFAULT_BUSY_TIMEOUT};

use async_trait::async_trait;

/// Single-collection book persistence.
///
/// Every operation is one atomic transaction. Independent calls are not
/// ordered relative to each other.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Establishes that the database can be opened at the current schema
    /// version, creating or upgrading it if needed.
    async fn open(&self) -> Result<()>;

    /// Returns every stored book, in storage order.
    /// Books stored before the author field existed come back with an empty author.
    async fn load_all(&self) -> Result<Vec<Book>>;

    /// Returns the books whose author is exactly `author`.
    async fn load_by_author(&self, author: &str) -> Result<Vec<Book>>;

    /// Inserts the book, or fully replaces the stored book with the same id.
    async fn put(&self, book: &Book) -> Result<()>;

    /// Removes the book with the given id. Removing a missing id is not an error.
    async fn delete(&self, id: &BookId) -> Result<()>;
}
