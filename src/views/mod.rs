//! Derived views over the in-memory collection.
//!
//! Everything here is pure and recomputed on demand from a snapshot of the
//! books; nothing is cached.

mod format;
mod sort;
mod stats;

pub use format::{format_date, format_money};
pub use sort::{sort_books, SortMode};
pub use stats::CollectionStats;
