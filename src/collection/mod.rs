//! Session-scoped state of the book collection.

mod manager;

pub use manager::{BootstrapOutcome, Collection};
