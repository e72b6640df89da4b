//! Shared values for test fixtures
#![allow(dead_code)]

pub const TEST_PUBLISHER: &str = "Grove Press";
pub const TEST_PRE_ORDER_START: &str = "2024-01-05";
pub const TEST_ESTIMATED_DELIVERY: &str = "2024-06-30";

pub const LEGACY_BOOK_ID: &str = "legacy-1";
pub const LEGACY_BOOK_TITLE: &str = "The Old Tome";
