//! SQLite schema definitions for the book database.
//!
//! The database holds a single `books` table keyed by the client-generated
//! book id. Upgrades are additive only and every migration step tolerates
//! running against a database that already has the change.

use crate::sqlite_column;
use crate::sqlite_persistence::{
    column_exists, index_exists, Column, SqlType, Table, VersionedSchema,
};
use rusqlite::Connection;

pub const BOOKS_TABLE_NAME: &str = "books";
pub const AUTHOR_INDEX_NAME: &str = "idx_books_author";

// =============================================================================
// Version 1 - Books
// =============================================================================

const BOOKS_TABLE_V1: Table = Table {
    name: BOOKS_TABLE_NAME,
    columns: &[
        sqlite_column!("id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("publisher", &SqlType::Text, non_null = true),
        sqlite_column!("pre_order_start_date", &SqlType::Text, non_null = true),
        sqlite_column!("estimated_delivery_date", &SqlType::Text, non_null = true),
        sqlite_column!(
            "ordered",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!(
            "delivered",
            &SqlType::Text,
            non_null = true,
            default_value = Some("'No'")
        ),
        sqlite_column!(
            "total_price",
            &SqlType::Real,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!(
            "quantity",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("1")
        ),
        sqlite_column!(
            "for_sale",
            &SqlType::Text,
            non_null = true,
            default_value = Some("'No'")
        ),
        sqlite_column!("sold_for", &SqlType::Real),
        sqlite_column!(
            "tags",
            &SqlType::Text,
            non_null = true,
            default_value = Some("'[]'")
        ),
    ],
    indices: &[],
};

// =============================================================================
// Version 2 - Author column and index
// =============================================================================

const BOOKS_TABLE_V2: Table = Table {
    name: BOOKS_TABLE_NAME,
    columns: &[
        sqlite_column!("id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("publisher", &SqlType::Text, non_null = true),
        sqlite_column!("pre_order_start_date", &SqlType::Text, non_null = true),
        sqlite_column!("estimated_delivery_date", &SqlType::Text, non_null = true),
        sqlite_column!(
            "ordered",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!(
            "delivered",
            &SqlType::Text,
            non_null = true,
            default_value = Some("'No'")
        ),
        sqlite_column!(
            "total_price",
            &SqlType::Real,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!(
            "quantity",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("1")
        ),
        sqlite_column!(
            "for_sale",
            &SqlType::Text,
            non_null = true,
            default_value = Some("'No'")
        ),
        sqlite_column!("sold_for", &SqlType::Real),
        sqlite_column!(
            "tags",
            &SqlType::Text,
            non_null = true,
            default_value = Some("'[]'")
        ),
        // Nullable: rows written before version 2 keep no author.
        sqlite_column!("author", &SqlType::Text),
    ],
    indices: &[(AUTHOR_INDEX_NAME, "author")],
};

/// Migration from version 1 to version 2: add the author column and its
/// non-unique index. Existing rows are left untouched.
fn migrate_v1_to_v2(conn: &Connection) -> anyhow::Result<()> {
    if !column_exists(conn, BOOKS_TABLE_NAME, "author")? {
        conn.execute("ALTER TABLE books ADD COLUMN author TEXT", [])?;
    }
    if !index_exists(conn, BOOKS_TABLE_NAME, AUTHOR_INDEX_NAME)? {
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_books_author ON books(author)",
            [],
        )?;
    }
    Ok(())
}

// =============================================================================
// Versioned Schema Definition
// =============================================================================

/// All versioned schemas for the book database.
///
/// Version 1: books table
/// Version 2: author column with a non-unique index
pub const BOOKS_VERSIONED_SCHEMAS: &[VersionedSchema] = &[
    VersionedSchema {
        version: 1,
        tables: &[BOOKS_TABLE_V1],
        migration: None,
    },
    VersionedSchema {
        version: 2,
        tables: &[BOOKS_TABLE_V2],
        migration: Some(migrate_v1_to_v2),
    },
];

/// Version every opened database ends up at.
pub const BOOKS_SCHEMA_VERSION: usize = 2;
