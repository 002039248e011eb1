//! Runtime configuration (`config.toml`).
//!
//! ```toml
//! cycle_check = "read"    # or "write"
//! log_filter = "info"
//! snapshot = "cells.grd"
//! ```

use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{CellstoreError, Result};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

/// When circular references are detected.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePolicy {
    /// Writes are accepted as-is; reads of a cell reaching a cycle fail.
    #[default]
    Read,
    /// Writes that would close a cycle are rejected as well.
    Write,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub cycle_check: CyclePolicy,
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    pub log_filter: String,
    /// Snapshot loaded at startup and written back on exit.
    pub snapshot: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cycle_check: CyclePolicy::Read,
            log_filter: "info".to_string(),
            snapshot: None,
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| CellstoreError::Config(e.to_string()))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the platform config file
    /// (`config.toml` under the cellstore config dir) is used if present,
    /// otherwise defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Config::default()),
            },
        };

        let meta = std::fs::metadata(&path)?;
        if meta.len() > MAX_CONFIG_FILE_BYTES {
            return Err(CellstoreError::Config(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            )));
        }
        let content = std::fs::read_to_string(&path)?;
        Config::from_toml(&content)
            .map_err(|e| CellstoreError::Config(format!("{}: {}", path.display(), e)))
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("com", "cellstore", "cellstore")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.cycle_check, CyclePolicy::Read);
    }

    #[test]
    fn test_full_file() {
        let config = Config::from_toml(
            r#"
cycle_check = "write"
log_filter = "cellstore_core=debug"
snapshot = "/tmp/cells.grd"
"#,
        )
        .unwrap();
        assert_eq!(config.cycle_check, CyclePolicy::Write);
        assert_eq!(config.log_filter, "cellstore_core=debug");
        assert_eq!(config.snapshot, Some(PathBuf::from("/tmp/cells.grd")));
    }

    #[test]
    fn test_rejects_unknown_keys_and_values() {
        assert!(Config::from_toml("colour = \"red\"").is_err());
        assert!(Config::from_toml("cycle_check = \"never\"").is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            Config::load(Some(&missing)),
            Err(CellstoreError::Io(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "cycle_check = \"write\"\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.cycle_check, CyclePolicy::Write);
        assert_eq!(config.log_filter, "info");
    }
}
