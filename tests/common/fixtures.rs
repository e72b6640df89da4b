//! Test fixtures: temporary databases, stores with injected failures, and a
//! ready-made collection wired to a recording notifier.
#![allow(dead_code)]

use super::constants::*;
use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::Semaphore;
use tome_tracker::book_store::{
    Book, BookDetails, BookId, BookStore, BookStoreError, SqliteBookStore,
    BOOKS_VERSIONED_SCHEMAS,
};
use tome_tracker::collection::Collection;
use tome_tracker::notifications::MemoryNotifier;

pub fn book_details(title: &str, total_price: f64) -> BookDetails {
    BookDetails {
        title: title.to_string(),
        publisher: TEST_PUBLISHER.to_string(),
        pre_order_start_date: TEST_PRE_ORDER_START.to_string(),
        estimated_delivery_date: TEST_ESTIMATED_DELIVERY.to_string(),
        total_price,
        ..Default::default()
    }
}

/// Creates a database at schema version 1 holding one book, as written
/// before the author field existed.
pub fn create_v1_database(path: &Path) -> Result<()> {
    let conn = Connection::open(path)?;
    BOOKS_VERSIONED_SCHEMAS[0].create(&conn)?;
    conn.execute(
        "INSERT INTO books (id, title, publisher, pre_order_start_date, estimated_delivery_date,
                            ordered, delivered, total_price, quantity, for_sale, sold_for, tags)
         VALUES (?1, ?2, ?3, ?4, ?5, 1, 'Shipped', 42.5, 2, 'Maybe', NULL, '[\"Signed\"]')",
        rusqlite::params![
            LEGACY_BOOK_ID,
            LEGACY_BOOK_TITLE,
            TEST_PUBLISHER,
            TEST_PRE_ORDER_START,
            TEST_ESTIMATED_DELIVERY
        ],
    )?;
    conn.close().map_err(|(_, e)| e)?;
    Ok(())
}

/// A collection over a fresh SQLite store in a temporary directory.
pub struct TestEnv {
    pub collection: Arc<Collection>,
    pub store: Arc<SqliteBookStore>,
    pub notifier: Arc<MemoryNotifier>,
    pub db_path: PathBuf,
    _temp_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("book-tracker.db");
        let store = Arc::new(SqliteBookStore::new(&db_path));
        let notifier = Arc::new(MemoryNotifier::new());
        let collection = Arc::new(Collection::new(store.clone(), notifier.clone()));
        Self {
            collection,
            store,
            notifier,
            db_path,
            _temp_dir: temp_dir,
        }
    }

    pub async fn bootstrapped() -> Self {
        let env = Self::new();
        env.collection.bootstrap().await;
        env
    }

    /// A second, independent store on the same database file.
    pub fn reopen_store(&self) -> SqliteBookStore {
        SqliteBookStore::new(&self.db_path)
    }
}

/// Delegates to an inner store, failing reads or writes on demand.
pub struct FlakyBookStore {
    inner: Arc<dyn BookStore>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FlakyBookStore {
    pub fn new(inner: Arc<dyn BookStore>) -> Self {
        Self {
            inner,
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_reads(&self) -> Result<(), BookStoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(BookStoreError::ReadFailed("injected read failure".to_string()));
        }
        Ok(())
    }

    fn check_writes(&self) -> Result<(), BookStoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BookStoreError::WriteFailed("injected write failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BookStore for FlakyBookStore {
    async fn open(&self) -> Result<(), BookStoreError> {
        self.inner.open().await
    }

    async fn load_all(&self) -> Result<Vec<Book>, BookStoreError> {
        self.check_reads()?;
        self.inner.load_all().await
    }

    async fn load_by_author(&self, author: &str) -> Result<Vec<Book>, BookStoreError> {
        self.check_reads()?;
        self.inner.load_by_author(author).await
    }

    async fn put(&self, book: &Book) -> Result<(), BookStoreError> {
        self.check_writes()?;
        self.inner.put(book).await
    }

    async fn delete(&self, id: &BookId) -> Result<(), BookStoreError> {
        self.check_writes()?;
        self.inner.delete(id).await
    }
}

/// Holds every write until [`GatedBookStore::release`] is called, so a test
/// can act while the write is still in flight.
pub struct GatedBookStore {
    inner: Arc<dyn BookStore>,
    gate: Semaphore,
}

impl GatedBookStore {
    pub fn new(inner: Arc<dyn BookStore>) -> Self {
        Self {
            inner,
            gate: Semaphore::new(0),
        }
    }

    pub fn release(&self, writes: usize) {
        self.gate.add_permits(writes);
    }

    async fn wait(&self) -> Result<(), BookStoreError> {
        self.gate
            .acquire()
            .await
            .map(|permit| permit.forget())
            .map_err(|e| BookStoreError::WriteFailed(e.to_string()))
    }
}

#[async_trait]
impl BookStore for GatedBookStore {
    async fn open(&self) -> Result<(), BookStoreError> {
        self.inner.open().await
    }

    async fn load_all(&self) -> Result<Vec<Book>, BookStoreError> {
        self.inner.load_all().await
    }

    async fn load_by_author(&self, author: &str) -> Result<Vec<Book>, BookStoreError> {
        self.inner.load_by_author(author).await
    }

    async fn put(&self, book: &Book) -> Result<(), BookStoreError> {
        self.wait().await?;
        self.inner.put(book).await
    }

    async fn delete(&self, id: &BookId) -> Result<(), BookStoreError> {
        self.wait().await?;
        self.inner.delete(id).await
    }
}
