//! # Application Config
//!
//! Resolves the data directory and manages `app_config.yaml` inside it.
//!
//! ```text
//! Container Tracker/
//! ├── app_config.yaml       ← This module manages this file
//! └── container_system.db   ← SQLite store named by `database_file`
//! ```
//!
//! ## YAML Format
//!
//! ```yaml
//! database_file: "container_system.db"
//! data_format_version: "1.0"
//! created_at: "2025-01-21T19:30:00Z"
//! ```

use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "app_config.yaml";
const DATA_DIRECTORY_NAME: &str = "Container Tracker";
const DEFAULT_DATABASE_FILE: &str = "container_system.db";

/// Persistent application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite file name, relative to the data directory unless absolute
    pub database_file: String,
    /// Data format version for future migrations
    pub data_format_version: String,
    /// When the config was first created
    pub created_at: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_file: DEFAULT_DATABASE_FILE.to_string(),
            data_format_version: "1.0".to_string(),
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

impl AppConfig {
    /// Load the config from `data_directory`, creating a default one if missing
    pub fn load_or_create(data_directory: &Path) -> Result<Self> {
        let config_path = data_directory.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let yaml_content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let config: AppConfig = serde_yaml::from_str(&yaml_content)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?;
            debug!("Loaded app config from {:?}", config_path);
            Ok(config)
        } else {
            let config = AppConfig::default();
            config.save(data_directory)?;
            info!("Created default app config at {:?}", config_path);
            Ok(config)
        }
    }

    /// Write the config atomically: temp file first, then rename
    pub fn save(&self, data_directory: &Path) -> Result<()> {
        if !data_directory.exists() {
            fs::create_dir_all(data_directory)?;
            info!("Created data directory: {:?}", data_directory);
        }

        let config_path = data_directory.join(CONFIG_FILE_NAME);
        let yaml_content = serde_yaml::to_string(self)?;

        let temp_path = config_path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &config_path)?;

        debug!("Saved app config to {:?}", config_path);
        Ok(())
    }

    /// Full path of the SQLite file
    pub fn database_path(&self, data_directory: &Path) -> PathBuf {
        let file = Path::new(&self.database_file);
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            data_directory.join(file)
        }
    }
}

/// `~/Documents/Container Tracker`, falling back to the home directory and
/// then to the working directory
pub fn default_data_directory() -> PathBuf {
    if let Some(documents) = dirs::document_dir() {
        return documents.join(DATA_DIRECTORY_NAME);
    }
    if let Some(home) = dirs::home_dir() {
        warn!("No Documents folder found, using home directory");
        return home.join(DATA_DIRECTORY_NAME);
    }
    warn!("No home directory found, using working directory");
    PathBuf::from(DATA_DIRECTORY_NAME)
}
