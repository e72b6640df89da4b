//! Tome Tracker Library
//!
//! A local book-collection tracker: a versioned SQLite record store, the
//! session state kept on top of it, derived views and form normalization.

pub mod book_store;
pub mod collection;
pub mod config;
pub mod form;
pub mod notifications;
pub mod sqlite_persistence;
pub mod views;

// Re-export commonly used types for convenience
pub use book_store::{
    Book, BookDetails, BookId, BookStore, BookStoreError, SaveRequest, SqliteBookStore,
};
pub use collection::{BootstrapOutcome, Collection};
pub use notifications::{Notification, Notifier};
