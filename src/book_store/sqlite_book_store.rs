use super::error::{BookStoreError, Result};
use super::models::{Book, BookDetails, BookId, DeliveryStatus, ForSaleStatus};
use super::schema::{BOOKS_SCHEMA_VERSION, BOOKS_VERSIONED_SCHEMAS};
use super::BookStore;
use crate::sqlite_persistence::{read_schema_version, write_schema_version};
use async_trait::async_trait;
use rusqlite::{
    params, types::Type, Connection, ErrorCode, OpenFlags, Row, Transaction,
    TransactionBehavior,
};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};

pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(1000);

const BOOK_COLUMNS: &str = "id, title, author, publisher, pre_order_start_date, \
     estimated_delivery_date, ordered, delivered, total_price, quantity, for_sale, sold_for, tags";

/// Kind of transaction an operation runs. Reads take a deferred lock,
/// writes take the write lock up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransactionMode {
    ReadOnly,
    ReadWrite,
}

impl TransactionMode {
    fn behavior(self) -> TransactionBehavior {
        match self {
            TransactionMode::ReadOnly => TransactionBehavior::Deferred,
            TransactionMode::ReadWrite => TransactionBehavior::Immediate,
        }
    }

    fn failure(self, reason: String) -> BookStoreError {
        match self {
            TransactionMode::ReadOnly => BookStoreError::ReadFailed(reason),
            TransactionMode::ReadWrite => BookStoreError::WriteFailed(reason),
        }
    }
}

/// Book store backed by a single SQLite file.
///
/// No connection is kept between operations: each call opens the database,
/// brings the schema up to date, runs exactly one transaction against the
/// `books` table and closes the connection again, whatever the outcome.
///
/// Clones share one write gate: write transactions, and any operation that
/// may still have to create or upgrade the schema, run one at a time within
/// the process. Reads of a ready database run concurrently.
#[derive(Debug, Clone)]
pub struct SqliteBookStore {
    db_path: PathBuf,
    busy_timeout: Duration,
    write_gate: Arc<Mutex<()>>,
    schema_ready: Arc<AtomicBool>,
}

impl SqliteBookStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            write_gate: Arc::new(Mutex::new(())),
            schema_ready: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Opens a connection with the schema at [`BOOKS_SCHEMA_VERSION`],
    /// creating or upgrading the database first if needed.
    pub fn open_connection(&self) -> Result<Connection> {
        self.check_storage_available()?;

        let mut conn = Connection::open_with_flags(
            &self.db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| BookStoreError::OpenFailed(format!("{:?}: {}", self.db_path, e)))?;
        conn.busy_timeout(self.busy_timeout)
            .map_err(|e| BookStoreError::OpenFailed(e.to_string()))?;

        Self::ensure_schema(&mut conn, &self.db_path)?;
        self.schema_ready.store(true, Ordering::SeqCst);
        Ok(conn)
    }

    fn check_storage_available(&self) -> Result<()> {
        let dir = match self.db_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !dir.exists() {
            return Err(BookStoreError::StorageUnavailable(format!(
                "data directory {:?} does not exist",
                dir
            )));
        }
        if !dir.is_dir() {
            return Err(BookStoreError::StorageUnavailable(format!(
                "{:?} is not a directory",
                dir
            )));
        }
        if self.db_path.is_dir() {
            return Err(BookStoreError::StorageUnavailable(format!(
                "{:?} is a directory, not a database file",
                self.db_path
            )));
        }
        Ok(())
    }

    fn ensure_schema(conn: &mut Connection, path: &Path) -> Result<()> {
        match read_schema_version(conn).map_err(classify_upgrade_error)? {
            Some(version) if version == BOOKS_SCHEMA_VERSION => {
                return Self::validate_schema(conn, version);
            }
            Some(version) if version > BOOKS_SCHEMA_VERSION => {
                return Err(newer_version_error(version));
            }
            _ => {}
        }

        // The journal mode cannot change inside a transaction. It is stored
        // in the file, so this only happens while creating or upgrading.
        enable_wal(conn).map_err(|e| classify_upgrade_error(anyhow::Error::new(e)))?;

        // Creation and migration both change the version, so they run under
        // the write lock and re-read the version once it is held.
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| classify_upgrade_error(anyhow::Error::new(e)))?;

        match read_schema_version(&tx).map_err(classify_upgrade_error)? {
            None => {
                info!("Creating new book database at {:?}", path);
                BOOKS_VERSIONED_SCHEMAS
                    .last()
                    .ok_or_else(|| BookStoreError::OpenFailed("no schema defined".into()))?
                    .create(&tx)
                    .map_err(classify_upgrade_error)?;
            }
            Some(version) if version == BOOKS_SCHEMA_VERSION => {
                debug!("Book database was upgraded by another connection");
            }
            Some(version) if version > BOOKS_SCHEMA_VERSION => {
                return Err(newer_version_error(version));
            }
            Some(version) => {
                Self::validate_schema(&tx, version)?;
                info!(
                    "Migrating book database from version {} to {}",
                    version, BOOKS_SCHEMA_VERSION
                );
                Self::migrate(&tx, version)?;
            }
        }

        tx.commit()
            .map_err(|e| classify_upgrade_error(anyhow::Error::new(e)))
    }

    fn validate_schema(conn: &Connection, version: usize) -> Result<()> {
        let schema = BOOKS_VERSIONED_SCHEMAS
            .iter()
            .find(|s| s.version == version)
            .ok_or_else(|| {
                BookStoreError::OpenFailed(format!("Unknown book database version {}", version))
            })?;
        schema.validate(conn).map_err(|e| {
            BookStoreError::OpenFailed(format!(
                "Book database schema validation failed for version {}: {}",
                version, e
            ))
        })
    }

    fn migrate(conn: &Connection, from_version: usize) -> Result<()> {
        let mut latest_from = from_version;
        for schema in BOOKS_VERSIONED_SCHEMAS
            .iter()
            .filter(|s| s.version > from_version)
        {
            info!(
                "Running book database migration from version {} to {}",
                latest_from, schema.version
            );
            if let Some(migration_fn) = schema.migration {
                migration_fn(conn).map_err(classify_upgrade_error)?;
            }
            latest_from = schema.version;
        }
        write_schema_version(conn, latest_from).map_err(classify_upgrade_error)
    }

    fn run_transaction<T, F>(&self, mode: TransactionMode, executor: F) -> Result<T>
    where
        F: FnOnce(&Transaction) -> rusqlite::Result<T>,
    {
        let mut conn = self.open_connection()?;
        let outcome = execute_in_transaction(&mut conn, mode, executor);

        if let Err((_, e)) = conn.close() {
            // The transaction has already settled at this point.
            warn!("Failed to close book database connection: {}", e);
        }

        outcome.map_err(|e| mode.failure(e.to_string()))
    }

    /// Takes the write gate when `mode` writes, or when the schema has not
    /// been brought up to date by this store yet.
    async fn acquire_gate(&self, mode: TransactionMode) -> Option<OwnedMutexGuard<()>> {
        if mode == TransactionMode::ReadWrite || !self.schema_ready.load(Ordering::SeqCst) {
            Some(self.write_gate.clone().lock_owned().await)
        } else {
            None
        }
    }

    async fn run<T, F>(&self, mode: TransactionMode, executor: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Transaction) -> rusqlite::Result<T> + Send + 'static,
    {
        let gate = self.acquire_gate(mode).await;
        let store = self.clone();
        tokio::task::spawn_blocking(move || {
            let _gate = gate;
            store.run_transaction(mode, executor)
        })
        .await
        .map_err(|e| mode.failure(format!("Storage task did not complete: {}", e)))?
    }

    fn row_to_book(row: &Row) -> rusqlite::Result<Book> {
        let delivered_str: String = row.get("delivered")?;
        let delivered = DeliveryStatus::parse(&delivered_str).ok_or_else(|| {
            invalid_column(7, format!("Unknown delivery status {}", delivered_str))
        })?;

        let for_sale_str: String = row.get("for_sale")?;
        let for_sale = ForSaleStatus::parse(&for_sale_str).ok_or_else(|| {
            invalid_column(10, format!("Unknown for-sale status {}", for_sale_str))
        })?;

        let tags_json: String = row.get("tags")?;
        let tags: Vec<String> = serde_json::from_str(&tags_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(12, Type::Text, Box::new(e)))?;

        // Rows written before the author column existed have NULL here.
        let author: Option<String> = row.get("author")?;

        Ok(Book {
            id: BookId(row.get("id")?),
            details: BookDetails {
                title: row.get("title")?,
                author: author.unwrap_or_default(),
                publisher: row.get("publisher")?,
                pre_order_start_date: row.get("pre_order_start_date")?,
                estimated_delivery_date: row.get("estimated_delivery_date")?,
                ordered: row.get("ordered")?,
                delivered,
                for_sale,
                total_price: row.get("total_price")?,
                quantity: row.get("quantity")?,
                sold_for: row.get("sold_for")?,
                tags,
            },
        })
    }
}

fn execute_in_transaction<T, F>(
    conn: &mut Connection,
    mode: TransactionMode,
    executor: F,
) -> rusqlite::Result<T>
where
    F: FnOnce(&Transaction) -> rusqlite::Result<T>,
{
    // Dropping the transaction on the error path rolls it back.
    let tx = conn.transaction_with_behavior(mode.behavior())?;
    let value = executor(&tx)?;
    tx.commit()?;
    Ok(value)
}

fn enable_wal(conn: &Connection) -> rusqlite::Result<()> {
    let mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    if !mode.eq_ignore_ascii_case("wal") {
        warn!("Book database stays in {} journal mode", mode);
    }
    Ok(())
}

fn invalid_column(index: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, message.into())
}

fn newer_version_error(version: usize) -> BookStoreError {
    BookStoreError::OpenFailed(format!(
        "Book database version {} is newer than the supported version {}",
        version, BOOKS_SCHEMA_VERSION
    ))
}

/// Lock contention while changing the schema means another connection is in
/// the way; anything else is a plain open failure.
fn classify_upgrade_error(err: anyhow::Error) -> BookStoreError {
    let blocked = err.chain().any(|cause| {
        matches!(
            cause
                .downcast_ref::<rusqlite::Error>()
                .and_then(|e| e.sqlite_error_code()),
            Some(ErrorCode::DatabaseBusy) | Some(ErrorCode::DatabaseLocked)
        )
    });
    if blocked {
        BookStoreError::UpgradeBlocked {
            target_version: BOOKS_SCHEMA_VERSION,
            reason: err.to_string(),
        }
    } else {
        BookStoreError::OpenFailed(err.to_string())
    }
}

#[async_trait]
impl BookStore for SqliteBookStore {
    async fn open(&self) -> Result<()> {
        let gate = self.acquire_gate(TransactionMode::ReadOnly).await;
        let store = self.clone();
        tokio::task::spawn_blocking(move || {
            let _gate = gate;
            let conn = store.open_connection()?;
            conn.close().map_err(|(_, e)| BookStoreError::OpenFailed(e.to_string()))
        })
        .await
        .map_err(|e| BookStoreError::OpenFailed(format!("Storage task did not complete: {}", e)))?
    }

    async fn load_all(&self) -> Result<Vec<Book>> {
        let books = self
            .run(TransactionMode::ReadOnly, |tx| {
                let mut stmt = tx.prepare(&format!(
                    "SELECT {} FROM books ORDER BY rowid",
                    BOOK_COLUMNS
                ))?;
                let books = stmt
                    .query_map([], Self::row_to_book)?
                    .collect::<rusqlite::Result<Vec<Book>>>()?;
                Ok(books)
            })
            .await?;
        debug!("Loaded {} books from {:?}", books.len(), self.db_path);
        Ok(books)
    }

    async fn load_by_author(&self, author: &str) -> Result<Vec<Book>> {
        let author = author.to_string();
        self.run(TransactionMode::ReadOnly, move |tx| {
            let mut stmt = tx.prepare(&format!(
                "SELECT {} FROM books \
                 WHERE author = ?1 OR (?1 = '' AND author IS NULL) ORDER BY rowid",
                BOOK_COLUMNS
            ))?;
            let books = stmt
                .query_map(params![author], Self::row_to_book)?
                .collect::<rusqlite::Result<Vec<Book>>>()?;
            Ok(books)
        })
        .await
    }

    async fn put(&self, book: &Book) -> Result<()> {
        let tags_json = serde_json::to_string(&book.details.tags)
            .map_err(|e| BookStoreError::WriteFailed(e.to_string()))?;
        let book = book.clone();
        let id = book.id.clone();

        self.run(TransactionMode::ReadWrite, move |tx| {
            let details = &book.details;
            tx.execute(
                "INSERT INTO books (id, title, author, publisher, pre_order_start_date,
                    estimated_delivery_date, ordered, delivered, total_price, quantity,
                    for_sale, sold_for, tags)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
                 ON CONFLICT(id) DO UPDATE SET
                    title = excluded.title,
                    author = excluded.author,
                    publisher = excluded.publisher,
                    pre_order_start_date = excluded.pre_order_start_date,
                    estimated_delivery_date = excluded.estimated_delivery_date,
                    ordered = excluded.ordered,
                    delivered = excluded.delivered,
                    total_price = excluded.total_price,
                    quantity = excluded.quantity,
                    for_sale = excluded.for_sale,
                    sold_for = excluded.sold_for,
                    tags = excluded.tags",
                params![
                    book.id.as_str(),
                    details.title,
                    details.author,
                    details.publisher,
                    details.pre_order_start_date,
                    details.estimated_delivery_date,
                    details.ordered,
                    details.delivered.as_str(),
                    details.total_price,
                    details.quantity,
                    details.for_sale.as_str(),
                    details.sold_for,
                    tags_json,
                ],
            )?;
            Ok(())
        })
        .await?;

        debug!("Stored book {}", id);
        Ok(())
    }

    async fn delete(&self, id: &BookId) -> Result<()> {
        let key = id.as_str().to_string();
        let removed = self
            .run(TransactionMode::ReadWrite, move |tx| {
                tx.execute("DELETE FROM books WHERE id = ?1", params![key])
            })
            .await?;

        if removed == 0 {
            debug!("Delete of book {} was a no-op, no such record", id);
        } else {
            debug!("Deleted book {}", id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book_store::schema::BOOKS_VERSIONED_SCHEMAS;
    use crate::sqlite_persistence::BASE_DB_VERSION;
    use tempfile::TempDir;

    fn sample_book(id: &str, title: &str) -> Book {
        Book::new(
            BookId::from(id),
            BookDetails {
                title: title.to_string(),
                author: "A. Writer".to_string(),
                publisher: "Grove".to_string(),
                pre_order_start_date: "2024-01-01".to_string(),
                estimated_delivery_date: "2024-06-01".to_string(),
                total_price: 10.0,
                tags: vec!["Signed".to_string(), "First Edition".to_string()],
                ..Default::default()
            },
        )
    }

    fn store_in(dir: &TempDir) -> SqliteBookStore {
        SqliteBookStore::new(dir.path().join("book-tracker.db"))
    }

    #[tokio::test]
    async fn test_open_creates_database_at_latest_version() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.open().await.unwrap();

        let conn = Connection::open(store.db_path()).unwrap();
        let raw: i64 = conn
            .query_row("PRAGMA user_version;", [], |r| r.get(0)).unwrap();
        assert_eq!(raw, (BASE_DB_VERSION + BOOKS_SCHEMA_VERSION) as i64);
        BOOKS_VERSIONED_SCHEMAS[1].validate(&conn).unwrap();
    }

    #[tokio::test]
    async fn test_open_twice_is_harmless() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.open().await.unwrap();
        store.open().await.unwrap();
    }

    #[tokio::test]
    async fn test_load_all_on_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_put_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut book = sample_book("b1", "Tome");
        book.details.sold_for = Some(7.5);
        book.details.delivered = DeliveryStatus::Shipped;
        book.details.for_sale = ForSaleStatus::Maybe;
        book.details.ordered = true;
        book.details.quantity = 3;

        store.put(&book).await.unwrap();

        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded, vec![book]);
    }

    #[tokio::test]
    async fn test_put_replaces_whole_record() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let book = sample_book("b1", "Tome");
        store.put(&book).await.unwrap();

        let mut replacement = sample_book("b1", "Tome, Revised");
        replacement.details.tags = vec![];
        replacement.details.author = String::new();
        store.put(&replacement).await.unwrap();

        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded, vec![replacement]);
    }

    #[tokio::test]
    async fn test_update_keeps_storage_order() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.put(&sample_book("b1", "First")).await.unwrap();
        store.put(&sample_book("b2", "Second")).await.unwrap();
        store.put(&sample_book("b1", "First, again")).await.unwrap();

        let titles: Vec<String> = store
            .load_all()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.details.title)
            .collect();
        assert_eq!(titles, vec!["First, again", "Second"]);
    }

    #[tokio::test]
    async fn test_delete_removes_and_missing_id_is_noop() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.put(&sample_book("b1", "Tome")).await.unwrap();

        store.delete(&BookId::from("b1")).await.unwrap();
        store.delete(&BookId::from("never-existed")).await.unwrap();

        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_by_author() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.put(&sample_book("b1", "One")).await.unwrap();
        let mut other = sample_book("b2", "Two");
        other.details.author = "Someone Else".to_string();
        store.put(&other).await.unwrap();
        let mut anonymous = sample_book("b3", "Three");
        anonymous.details.author = String::new();
        store.put(&anonymous).await.unwrap();

        let by_writer = store.load_by_author("A. Writer").await.unwrap();
        assert_eq!(by_writer.len(), 1);
        assert_eq!(by_writer[0].id, BookId::from("b1"));

        let without_author = store.load_by_author("").await.unwrap();
        assert_eq!(without_author.len(), 1);
        assert_eq!(without_author[0].id, BookId::from("b3"));
    }

    #[tokio::test]
    async fn test_missing_directory_is_storage_unavailable() {
        let dir = TempDir::new().unwrap();
        let store = SqliteBookStore::new(dir.path().join("missing").join("book-tracker.db"));

        let err = store.load_all().await.unwrap_err();
        assert!(matches!(err, BookStoreError::StorageUnavailable(_)));
        assert!(err.is_connection_error());
    }

    #[tokio::test]
    async fn test_newer_database_version_fails_to_open() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.open().await.unwrap();
        {
            let conn = Connection::open(store.db_path()).unwrap();
            write_schema_version(&conn, BOOKS_SCHEMA_VERSION + 1).unwrap();
        }

        let err = store.open().await.unwrap_err();
        assert!(matches!(err, BookStoreError::OpenFailed(_)));
        assert!(err.to_string().contains("newer"));
    }

    #[tokio::test]
    async fn test_corrupted_tags_surface_as_read_failure() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.put(&sample_book("b1", "Tome")).await.unwrap();
        {
            let conn = Connection::open(store.db_path()).unwrap();
            conn.execute("UPDATE books SET tags = 'not json' WHERE id = 'b1'", []).unwrap();
        }

        let err = store.load_all().await.unwrap_err();
        assert!(matches!(err, BookStoreError::ReadFailed(_)));
    }

    fn journal_mode(store: &SqliteBookStore) -> String {
        let conn = Connection::open(store.db_path()).unwrap();
        conn.query_row("PRAGMA journal_mode", [], |row| row.get(0)).unwrap()
    }

    async fn put_concurrently(store: &SqliteBookStore, count: usize) {
        let handles: Vec<_> = (0..count)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    let book = sample_book(&format!("b{}", i), &format!("Tome {}", i));
                    store.put(&book).await
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.unwrap();
            assert!(result.is_ok(), "put {} failed: {:?}", i, result);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_puts_on_fresh_database() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        put_concurrently(&store, 32).await;

        assert_eq!(store.load_all().await.unwrap().len(), 32);
        assert_eq!(journal_mode(&store), "wal");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_puts_after_open() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.open().await.unwrap();

        put_concurrently(&store, 32).await;

        let books = store.load_all().await.unwrap();
        assert_eq!(books.len(), 32);
        assert_eq!(journal_mode(&store), "wal");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_reads_alongside_writes() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.open().await.unwrap();

        let writer = {
            let store = store.clone();
            tokio::spawn(async move { put_concurrently(&store, 16).await })
        };
        let readers: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.load_all().await })
            })
            .collect();

        writer.await.unwrap();
        for reader in readers {
            assert!(reader.await.unwrap().is_ok());
        }
        assert_eq!(store.load_all().await.unwrap().len(), 16);
    }

    #[test]
    fn test_write_lock_blocks_creation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book-tracker.db");

        // A foreign connection holding the write lock on a fresh file.
        let blocker = Connection::open(&path).unwrap();
        blocker.execute_batch("BEGIN IMMEDIATE;").unwrap();

        let store = SqliteBookStore::new(&path).with_busy_timeout(Duration::from_millis(10));
        let err = store.open_connection().unwrap_err();
        assert!(
            matches!(err, BookStoreError::UpgradeBlocked { target_version: 2, .. }),
            "unexpected error: {:?}",
            err
        );

        blocker.execute_batch("ROLLBACK;").unwrap();
        store.open_connection().unwrap();
    }
}
