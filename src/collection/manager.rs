//! In-memory collection kept in step with the book store.
//!
//! The store is the source of truth; the cached list is only ever updated
//! after the corresponding store operation succeeded, and can always be
//! rebuilt from the store with [`Collection::reload`].

use crate::book_store::{Book, BookId, BookStore, BookStoreError, SaveRequest};
use crate::notifications::{Notification, Notifier};
use crate::views::{sort_books, CollectionStats, SortMode};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Result of loading the collection at session start.
#[derive(Debug)]
pub enum BootstrapOutcome {
    /// The stored books were loaded.
    Loaded(usize),
    /// Loading failed and the session started with an empty collection.
    Degraded(BookStoreError),
}

pub struct Collection {
    store: Arc<dyn BookStore>,
    notifier: Arc<dyn Notifier>,
    books: RwLock<Vec<Book>>,
    bootstrapping: AtomicBool,
    session: CancellationToken,
}

impl Collection {
    pub fn new(store: Arc<dyn BookStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            books: RwLock::new(Vec::new()),
            bootstrapping: AtomicBool::new(false),
            session: CancellationToken::new(),
        }
    }

    fn is_live(&self) -> bool {
        !self.session.is_cancelled()
    }

    fn notify(&self, notification: Notification) {
        if self.is_live() {
            self.notifier.notify(notification);
        }
    }

    pub fn is_bootstrapping(&self) -> bool {
        self.bootstrapping.load(Ordering::SeqCst)
    }

    /// Loads every stored book into the collection.
    ///
    /// A failing store never aborts the session: the failure is logged, the
    /// user is told, and the collection starts out empty.
    pub async fn bootstrap(&self) -> BootstrapOutcome {
        self.bootstrapping.store(true, Ordering::SeqCst);
        let loaded = self.store.load_all().await;

        let outcome = match loaded {
            Ok(books) => {
                let count = books.len();
                if self.is_live() {
                    *self.books.write().await = books;
                }
                info!("Loaded {} books", count);
                BootstrapOutcome::Loaded(count)
            }
            Err(err) => {
                error!("Failed to load books from the store: {}", err);
                if self.is_live() {
                    self.books.write().await.clear();
                }
                self.notify(
                    Notification::error("Could not load saved tomes")
                        .with_description("Starting with a fresh collection instead."),
                );
                BootstrapOutcome::Degraded(err)
            }
        };

        self.bootstrapping.store(false, Ordering::SeqCst);
        outcome
    }

    /// Replaces the cached list with the current store contents.
    pub async fn reload(&self) -> Result<usize, BookStoreError> {
        let books = self.store.load_all().await?;
        let count = books.len();
        if self.is_live() {
            *self.books.write().await = books;
        }
        debug!("Reloaded {} books", count);
        Ok(count)
    }

    /// Persists a new or edited book, then updates the collection.
    ///
    /// New books get a freshly generated id. On failure the collection is
    /// left as it was and the error is handed back to the caller.
    pub async fn save(&self, request: SaveRequest) -> Result<Book, BookStoreError> {
        let (book, is_new) = match request {
            SaveRequest::New(details) => (Book::new(BookId::generate(), details), true),
            SaveRequest::Existing(book) => (book, false),
        };

        if let Err(err) = self.store.put(&book).await {
            error!("Failed to persist book {}: {}", book.id, err);
            self.notify(
                Notification::error("Could not save that tome")
                    .with_description("Please try again."),
            );
            return Err(err);
        }

        if !self.is_live() {
            debug!("Session ended, not applying save of {}", book.id);
            return Ok(book);
        }

        {
            let mut books = self.books.write().await;
            if is_new {
                books.push(book.clone());
            } else if let Some(existing) = books.iter_mut().find(|b| b.id == book.id) {
                *existing = book.clone();
            } else {
                warn!("Saved book {} is not in the collection", book.id);
            }
        }

        let notification = if is_new {
            Notification::success("New tome added!").with_description(format!(
                "\"{}\" has been added to your collection.",
                book.title()
            ))
        } else {
            Notification::success("Tome updated successfully!").with_description(format!(
                "\"{}\" has been updated in your collection.",
                book.title()
            ))
        };
        self.notify(notification);

        Ok(book)
    }

    /// Deletes a book from the store, then from the collection.
    ///
    /// Returns the removed book when it was in the collection. Failures are
    /// reported once and not retried.
    pub async fn remove(&self, id: &BookId) -> Result<Option<Book>, BookStoreError> {
        let title = self.find(id).await.map(|book| book.details.title);

        if let Err(err) = self.store.delete(id).await {
            error!("Failed to remove book {}: {}", id, err);
            self.notify(
                Notification::error("Could not remove that tome")
                    .with_description("Please try again."),
            );
            return Err(err);
        }

        if !self.is_live() {
            debug!("Session ended, not applying removal of {}", id);
            return Ok(None);
        }

        let removed = {
            let mut books = self.books.write().await;
            books
                .iter()
                .position(|b| &b.id == id)
                .map(|index| books.remove(index))
        };

        self.notify(Notification::success("Tome removed").with_description(format!(
            "\"{}\" has been removed from your collection.",
            title.as_deref().unwrap_or("The tome")
        )));

        Ok(removed)
    }

    /// Snapshot of the collection, in collection order.
    pub async fn books(&self) -> Vec<Book> {
        self.books.read().await.clone()
    }

    pub async fn find(&self, id: &BookId) -> Option<Book> {
        self.books.read().await.iter().find(|b| &b.id == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }

    pub async fn stats(&self) -> CollectionStats {
        CollectionStats::compute(&self.books.read().await)
    }

    pub async fn sorted(&self, mode: SortMode) -> Vec<Book> {
        sort_books(&self.books.read().await, mode)
    }

    /// Ends the session. Operations still in flight run to completion in
    /// the store, but their results no longer touch the collection and no
    /// longer notify the user.
    pub fn end_session(&self) {
        self.session.cancel();
    }

    pub fn is_session_ended(&self) -> bool {
        self.session.is_cancelled()
    }
}
