use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub db_dir: Option<String>,
    pub busy_timeout_ms: Option<u64>,
    pub default_sort: Option<String>,

    // File-only settings
    pub db_name: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
db_dir = "/var/lib/tomes"
db_name = "my-tomes"
busy_timeout_ms = 2500
default_sort = "delivered"
"#
        )
        .unwrap();

        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(config.db_dir.as_deref(), Some("/var/lib/tomes"));
        assert_eq!(config.db_name.as_deref(), Some("my-tomes"));
        assert_eq!(config.busy_timeout_ms, Some(2500));
        assert_eq!(config.default_sort.as_deref(), Some("delivered"));
    }

    #[test]
    fn test_load_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = FileConfig::load(file.path()).unwrap();
        assert!(config.db_dir.is_none());
        assert!(config.db_name.is_none());
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "busy_timeout_ms = \"soon\"").unwrap();
        let err = FileConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = FileConfig::load(Path::new("/nonexistent/tome-tracker.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
