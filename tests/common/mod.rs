//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{book_details, TestEnv};
//!
//! #[tokio::test]
//! async fn test_add_book() {
//!     let env = TestEnv::bootstrapped().await;
//!     env.collection.save(SaveRequest::New(book_details("Tome", 10.0))).await.unwrap();
//! }
//! ```

mod constants;
mod fixtures;

// Public API - this is what tests import
pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::{
    book_details, create_v1_database, FlakyBookStore, GatedBookStore, TestEnv,
};
