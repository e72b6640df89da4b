mod file_config;

pub use file_config::FileConfig;

use crate::views::SortMode;
use anyhow::{bail, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DB_NAME: &str = "book-tracker";
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 1000;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_dir: Option<PathBuf>,
    pub busy_timeout_ms: u64,
    pub default_sort: SortMode,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_dir: PathBuf,
    pub db_name: String,
    pub busy_timeout_ms: u64,
    pub default_sort: SortMode,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        // TOML overrides CLI for each field
        let db_dir = file
            .db_dir
            .map(PathBuf::from)
            .or_else(|| cli.db_dir.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("db_dir must be specified via --db-dir or in config file")
            })?;

        // Validate db_dir exists
        if !db_dir.exists() {
            bail!("Database directory does not exist: {:?}", db_dir);
        }
        if !db_dir.is_dir() {
            bail!("db_dir is not a directory: {:?}", db_dir);
        }

        let db_name = file
            .db_name
            .unwrap_or_else(|| DEFAULT_DB_NAME.to_string());
        if db_name.trim().is_empty() || db_name.contains(['/', '\\']) {
            bail!("Invalid db_name: {:?}", db_name);
        }

        let busy_timeout_ms = file.busy_timeout_ms.unwrap_or(cli.busy_timeout_ms);

        let default_sort = match file.default_sort {
            Some(s) => s
                .parse::<SortMode>()
                .map_err(|e| anyhow::anyhow!("Invalid default_sort in config file: {}", e))?,
            None => cli.default_sort,
        };

        Ok(Self {
            db_dir,
            db_name,
            busy_timeout_ms,
            default_sort,
        })
    }

    /// Location of the SQLite file holding the collection.
    pub fn database_path(&self) -> PathBuf {
        self.db_dir.join(format!("{}.db", self.db_name))
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}
