use anyhow::{Context, Result};
use log::debug;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection as _, SqliteConnection};
use std::path::{Path, PathBuf};

use super::{AccountRepository, ContainerRepository, ScheduleRepository};
use crate::storage::traits::Connection;

/// DbConnection knows how to reach the SQLite file.
///
/// It holds no open handle: every repository call acquires its own
/// connection and closes it before returning.
#[derive(Clone)]
pub struct DbConnection {
    options: SqliteConnectOptions,
    path: PathBuf,
}

impl DbConnection {
    /// Create the database file if needed and set up the schema
    pub async fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let db = Self {
            options,
            path: path.to_path_buf(),
        };

        let mut conn = db.acquire().await?;
        Self::setup_schema(&mut conn).await?;
        conn.close().await?;

        Ok(db)
    }

    /// Path of the SQLite file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection for one gateway operation
    pub async fn acquire(&self) -> Result<SqliteConnection> {
        debug!("Opening connection to {}", self.path.display());
        self.options
            .connect()
            .await
            .with_context(|| format!("Failed to open database {}", self.path.display()))
    }

    /// Set up the required database schema
    async fn setup_schema(conn: &mut SqliteConnection) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS Account (
                companyName TEXT,
                taxId TEXT PRIMARY KEY,
                password TEXT
            );
            "#,
        )
        .execute(&mut *conn)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS Container (
                id TEXT PRIMARY KEY,
                containerType TEXT,
                height REAL,
                width REAL,
                length REAL,
                status TEXT,
                origin TEXT,
                destination TEXT,
                entryDate TEXT
            );
            "#,
        )
        .execute(&mut *conn)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS Schedule (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                containerId TEXT,
                scheduledDate TEXT,
                operationType TEXT,
                FOREIGN KEY(containerId) REFERENCES Container(id)
            );
            "#,
        )
        .execute(&mut *conn)
        .await?;

        // One schedule per container per day
        sqlx::query(
            r#"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_schedule_container_date
            ON Schedule(containerId, scheduledDate);
            "#,
        )
        .execute(&mut *conn)
        .await?;

        Ok(())
    }
}

impl Connection for DbConnection {
    type AccountRepository = AccountRepository;
    type ContainerRepository = ContainerRepository;
    type ScheduleRepository = ScheduleRepository;

    fn create_account_repository(&self) -> Self::AccountRepository {
        AccountRepository::new(self.clone())
    }

    fn create_container_repository(&self) -> Self::ContainerRepository {
        ContainerRepository::new(self.clone())
    }

    fn create_schedule_repository(&self) -> Self::ScheduleRepository {
        ScheduleRepository::new(self.clone())
    }
}

/// True when a statement failed on a PRIMARY KEY or UNIQUE constraint
pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => db_error.is_unique_violation(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::TestEnvironment;
    use sqlx::Row;

    #[tokio::test]
    async fn test_schema_is_created() {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        let mut conn = env.connection.acquire().await.unwrap();

        let rows = sqlx::query("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .fetch_all(&mut conn)
            .await
            .unwrap();
        let tables: Vec<String> = rows.iter().map(|r| r.get("name")).collect();

        assert!(tables.contains(&"Account".to_string()));
        assert!(tables.contains(&"Container".to_string()));
        assert!(tables.contains(&"Schedule".to_string()));
    }

    #[tokio::test]
    async fn test_reopening_existing_database_keeps_schema() {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");

        let reopened = DbConnection::new(env.connection.path()).await;
        assert!(reopened.is_ok());
    }

    #[tokio::test]
    async fn test_missing_parent_directory_is_created() {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        let nested = env.base_path.join("nested").join("store.db");

        let db = DbConnection::new(&nested).await.unwrap();
        assert!(db.path().exists());
    }
}
