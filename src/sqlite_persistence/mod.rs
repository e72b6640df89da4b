mod versioned_schema;

pub use versioned_schema::{
    column_exists, index_exists, read_schema_version, write_schema_version, Column, SqlType,
    Table, VersionedSchema, BASE_DB_VERSION,
};
