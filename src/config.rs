//! Application settings.
//!
//! Settings come from an optional TOML file, then the `STUDENT_DB_PATH`
//! environment variable overrides the database location.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{Result, StoreError};
use crate::sqlite::StorageConfig;

pub const DB_PATH_ENV: &str = "STUDENT_DB_PATH";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Settings {
    /// Load from `path` if given and present, then apply env overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?.unwrap_or_default(),
            None => Self::default(),
        };
        settings.apply_env_overrides();
        Ok(settings)
    }

    fn from_file(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(None);
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|err| StoreError::Config(format!("read config {}: {err}", path.display())))?;
        Self::from_toml(&raw)
            .map(Some)
            .map_err(|err| StoreError::Config(format!("parse config {}: {err}", path.display())))
    }

    pub fn from_toml(raw: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(path) = std::env::var_os(DB_PATH_ENV).filter(|v| !v.is_empty()) {
            self.storage.db_path = PathBuf::from(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::ConnectionMode;

    #[test]
    fn parses_pooled_storage() {
        let settings = Settings::from_toml(
            r#"
            [storage]
            db_path = "/tmp/records.db"
            connection_mode = { mode = "pooled", max_size = 4 }
            "#,
        )
        .unwrap();
        assert_eq!(settings.storage.db_path, PathBuf::from("/tmp/records.db"));
        assert_eq!(
            settings.storage.connection_mode,
            ConnectionMode::Pooled { max_size: 4 }
        );
    }

    #[test]
    fn mode_defaults_to_per_operation() {
        let settings = Settings::from_toml("[storage]\ndb_path = \"x.db\"\n").unwrap();
        assert_eq!(
            settings.storage.connection_mode,
            ConnectionMode::PerOperation
        );
    }

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn missing_explicit_file_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join("student-records-no-such-dir");
        let settings = Settings::from_file(&dir.join("settings.toml")).unwrap();
        assert_eq!(settings, None);
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Settings::from_toml(
            "[storage]\ndb_path = \"x.db\"\nconnection_mode = { mode = \"sharded\" }\n"
        )
        .is_err());
    }
}
