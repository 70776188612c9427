use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use sqlx::sqlite::SqliteRow;
use sqlx::{Connection as _, Row};
use shared::{format_date, Container, DATE_FORMAT};

use super::connection::{is_unique_violation, DbConnection};
use crate::storage::traits::{ContainerRemoval, ContainerStorage};

/// Repository for container operations
#[derive(Clone)]
pub struct ContainerRepository {
    db: DbConnection,
}

impl ContainerRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_container(row: &SqliteRow) -> Result<Container> {
        let id: String = row.try_get("id")?;
        let container_type: String = row.try_get("containerType")?;
        let status: String = row.try_get("status")?;
        let entry_date: String = row.try_get("entryDate")?;

        Ok(Container {
            container_type: container_type
                .parse()
                .with_context(|| format!("Container {} has an invalid type", id))?,
            height: row.try_get("height")?,
            width: row.try_get("width")?,
            length: row.try_get("length")?,
            status: status
                .parse()
                .with_context(|| format!("Container {} has an invalid status", id))?,
            origin: row.try_get("origin")?,
            destination: row.try_get("destination")?,
            entry_date: NaiveDate::parse_from_str(&entry_date, DATE_FORMAT)
                .with_context(|| format!("Container {} has an invalid entry date '{}'", id, entry_date))?,
            id,
        })
    }
}

#[async_trait]
impl ContainerStorage for ContainerRepository {
    async fn find_container(&self, container_id: &str) -> Result<Option<Container>> {
        let mut conn = self.db.acquire().await?;
        let row = sqlx::query(
            r#"
            SELECT id, containerType, height, width, length, status, origin, destination, entryDate
            FROM Container
            WHERE id = ?
            "#,
        )
        .bind(container_id)
        .fetch_optional(&mut conn)
        .await?;
        conn.close().await?;

        row.as_ref().map(Self::row_to_container).transpose()
    }

    async fn list_containers(&self) -> Result<Vec<Container>> {
        let mut conn = self.db.acquire().await?;
        let rows = sqlx::query(
            r#"
            SELECT id, containerType, height, width, length, status, origin, destination, entryDate
            FROM Container
            ORDER BY ROWID ASC
            "#,
        )
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        rows.iter().map(Self::row_to_container).collect()
    }

    async fn list_container_ids(&self) -> Result<Vec<String>> {
        let mut conn = self.db.acquire().await?;
        let rows = sqlx::query("SELECT id FROM Container ORDER BY ROWID ASC")
            .fetch_all(&mut conn)
            .await?;
        conn.close().await?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("id").map_err(anyhow::Error::from))
            .collect()
    }

    async fn insert_container(&self, container: &Container) -> Result<bool> {
        let mut conn = self.db.acquire().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO Container (id, containerType, height, width, length, status, origin, destination, entryDate)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&container.id)
        .bind(container.container_type.as_str())
        .bind(container.height)
        .bind(container.width)
        .bind(container.length)
        .bind(container.status.as_str())
        .bind(&container.origin)
        .bind(&container.destination)
        .bind(format_date(container.entry_date))
        .execute(&mut conn)
        .await;

        let inserted = match result {
            Ok(_) => true,
            Err(e) if is_unique_violation(&e) => {
                debug!("Container {} already present", container.id);
                false
            }
            Err(e) => return Err(e.into()),
        };
        conn.close().await?;
        Ok(inserted)
    }

    async fn delete_container_with_schedules(&self, container_id: &str) -> Result<ContainerRemoval> {
        let mut conn = self.db.acquire().await?;
        let mut tx = conn.begin().await?;

        let schedules = sqlx::query("DELETE FROM Schedule WHERE containerId = ?")
            .bind(container_id)
            .execute(&mut *tx)
            .await?;

        let container = sqlx::query("DELETE FROM Container WHERE id = ?")
            .bind(container_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        conn.close().await?;

        debug!(
            "Deleted container {} ({} rows) with {} schedules",
            container_id,
            container.rows_affected(),
            schedules.rows_affected()
        );

        Ok(ContainerRemoval {
            container_deleted: container.rows_affected() > 0,
            schedules_deleted: schedules.rows_affected(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::ScheduleRepository;
    use crate::storage::test_utils::{sample_container, TestEnvironment};
    use crate::storage::traits::ScheduleStorage;
    use shared::{NewSchedule, OperationType};

    #[tokio::test]
    async fn test_insert_and_find_container() {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        let repo = ContainerRepository::new(env.connection.clone());
        let container = sample_container("C1");

        assert!(repo.insert_container(&container).await.unwrap());

        let found = repo.find_container("C1").await.unwrap();
        assert_eq!(found, Some(container));
        assert!(repo.find_container("C2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_container_is_not_inserted() {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        let repo = ContainerRepository::new(env.connection.clone());

        assert!(repo.insert_container(&sample_container("C1")).await.unwrap());
        assert!(!repo.insert_container(&sample_container("C1")).await.unwrap());
        assert_eq!(repo.list_containers().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        let repo = ContainerRepository::new(env.connection.clone());

        for id in ["MSCU1", "ABCU2", "ZZZU3"] {
            repo.insert_container(&sample_container(id)).await.unwrap();
        }

        let ids = repo.list_container_ids().await.unwrap();
        assert_eq!(ids, vec!["MSCU1", "ABCU2", "ZZZU3"]);

        let containers = repo.list_containers().await.unwrap();
        assert_eq!(containers[1].id, "ABCU2");
    }

    #[tokio::test]
    async fn test_delete_container_removes_its_schedules_only() {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        let containers = ContainerRepository::new(env.connection.clone());
        let schedules = ScheduleRepository::new(env.connection.clone());

        containers.insert_container(&sample_container("C1")).await.unwrap();
        containers.insert_container(&sample_container("C2")).await.unwrap();
        for (container_id, day) in [("C1", 10), ("C1", 11), ("C2", 10)] {
            schedules
                .insert_schedule(&NewSchedule {
                    container_id: container_id.to_string(),
                    scheduled_date: NaiveDate::from_ymd_opt(2030, 1, day).unwrap(),
                    operation_type: OperationType::Loading,
                })
                .await
                .unwrap();
        }

        let removal = containers.delete_container_with_schedules("C1").await.unwrap();
        assert_eq!(
            removal,
            ContainerRemoval {
                container_deleted: true,
                schedules_deleted: 2,
            }
        );

        assert!(containers.find_container("C1").await.unwrap().is_none());
        let remaining = schedules.list_schedules().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].container_id, "C2");
    }

    #[tokio::test]
    async fn test_delete_missing_container_reports_nothing_deleted() {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        let repo = ContainerRepository::new(env.connection.clone());

        let removal = repo.delete_container_with_schedules("nope").await.unwrap();
        assert_eq!(removal, ContainerRemoval::default());
    }

    #[tokio::test]
    async fn test_corrupt_row_surfaces_as_error() {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        let repo = ContainerRepository::new(env.connection.clone());

        let mut conn = env.connection.acquire().await.unwrap();
        sqlx::query(
            "INSERT INTO Container VALUES ('BAD', 'Barrel', 1.0, 1.0, 1.0, 'Available', 'X', 'Y', '01/01/2030')",
        )
        .execute(&mut conn)
        .await
        .unwrap();
        conn.close().await.unwrap();

        assert!(repo.find_container("BAD").await.is_err());
    }
}
