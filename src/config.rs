//! File locations for the importer.
//!
//! Resolution order: explicit `--config` file, then `sales_importer.toml` in
//! the working directory, then built-in defaults. Command-line flags are
//! applied on top by the binaries.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "sales_importer.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the master file, the import log and import files
    pub data_dir: PathBuf,

    /// Master sales file name inside `data_dir`
    pub all_sales_file: String,

    /// Imported-file log name inside `data_dir`
    pub imported_files_log: String,

    /// SQLite database path
    pub database: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from("data"),
            all_sales_file: "all_sales.csv".to_string(),
            imported_files_log: "imported_files.txt".to_string(),
            database: PathBuf::from("db").join("sales_db.sqlite"),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        match config_path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        debug!(file = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn all_sales_path(&self) -> PathBuf {
        self.data_dir.join(&self.all_sales_file)
    }

    pub fn imported_files_path(&self) -> PathBuf {
        self.data_dir.join(&self.imported_files_log)
    }
}
