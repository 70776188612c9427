//! Shared fixtures for storage and domain tests.
//!
//! `TestEnvironment` owns a temporary directory holding a fresh SQLite file;
//! the directory and the database go away when the environment is dropped,
//! even if the test panics.

use anyhow::Result;
use chrono::NaiveDate;
use shared::{Container, ContainerStatus, ContainerType};
use std::path::PathBuf;
use tempfile::TempDir;

use super::sqlite::DbConnection;

pub struct TestEnvironment {
    /// Kept alive so the directory is only removed on drop
    _temp_dir: TempDir,
    pub connection: DbConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::with_prefix("container_tracker_")?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = DbConnection::new(&base_path.join("container_tracker.db")).await?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }
}

/// A valid dry container with the given ID
pub fn sample_container(id: &str) -> Container {
    Container {
        id: id.to_string(),
        container_type: ContainerType::Dry,
        height: 2.5,
        width: 2.3,
        length: 6.0,
        status: ContainerStatus::Available,
        origin: "Santos".to_string(),
        destination: "Rotterdam".to_string(),
        entry_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
    }
}
