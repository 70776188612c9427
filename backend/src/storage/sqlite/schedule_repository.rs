use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use sqlx::sqlite::SqliteRow;
use sqlx::{Connection as _, Row};
use shared::{format_date, NewSchedule, Schedule, DATE_FORMAT};

use super::connection::{is_unique_violation, DbConnection};
use crate::storage::traits::ScheduleStorage;

/// Repository for schedule operations
#[derive(Clone)]
pub struct ScheduleRepository {
    db: DbConnection,
}

impl ScheduleRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_schedule(row: &SqliteRow) -> Result<Schedule> {
        let id: i64 = row.try_get("id")?;
        let scheduled_date: String = row.try_get("scheduledDate")?;
        let operation_type: String = row.try_get("operationType")?;

        Ok(Schedule {
            id,
            container_id: row.try_get("containerId")?,
            scheduled_date: NaiveDate::parse_from_str(&scheduled_date, DATE_FORMAT)
                .with_context(|| format!("Schedule {} has an invalid date '{}'", id, scheduled_date))?,
            operation_type: operation_type
                .parse()
                .with_context(|| format!("Schedule {} has an invalid operation type", id))?,
        })
    }
}

#[async_trait]
impl ScheduleStorage for ScheduleRepository {
    async fn find_schedule(&self, schedule_id: i64) -> Result<Option<Schedule>> {
        let mut conn = self.db.acquire().await?;
        let row = sqlx::query(
            r#"
            SELECT id, containerId, scheduledDate, operationType
            FROM Schedule
            WHERE id = ?
            "#,
        )
        .bind(schedule_id)
        .fetch_optional(&mut conn)
        .await?;
        conn.close().await?;

        row.as_ref().map(Self::row_to_schedule).transpose()
    }

    async fn list_schedules(&self) -> Result<Vec<Schedule>> {
        let mut conn = self.db.acquire().await?;
        let rows = sqlx::query(
            r#"
            SELECT id, containerId, scheduledDate, operationType
            FROM Schedule
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        rows.iter().map(Self::row_to_schedule).collect()
    }

    async fn list_schedules_for_container(&self, container_id: &str) -> Result<Vec<Schedule>> {
        let mut conn = self.db.acquire().await?;
        let rows = sqlx::query(
            r#"
            SELECT id, containerId, scheduledDate, operationType
            FROM Schedule
            WHERE containerId = ?
            ORDER BY id ASC
            "#,
        )
        .bind(container_id)
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        rows.iter().map(Self::row_to_schedule).collect()
    }

    async fn find_schedule_for_date(&self, container_id: &str, date: NaiveDate) -> Result<Option<Schedule>> {
        let mut conn = self.db.acquire().await?;
        let row = sqlx::query(
            r#"
            SELECT id, containerId, scheduledDate, operationType
            FROM Schedule
            WHERE containerId = ? AND scheduledDate = ?
            "#,
        )
        .bind(container_id)
        .bind(format_date(date))
        .fetch_optional(&mut conn)
        .await?;
        conn.close().await?;

        row.as_ref().map(Self::row_to_schedule).transpose()
    }

    async fn insert_schedule(&self, schedule: &NewSchedule) -> Result<Option<Schedule>> {
        let mut conn = self.db.acquire().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO Schedule (containerId, scheduledDate, operationType)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&schedule.container_id)
        .bind(format_date(schedule.scheduled_date))
        .bind(schedule.operation_type.as_str())
        .execute(&mut conn)
        .await;

        let stored = match result {
            Ok(done) => Some(Schedule {
                id: done.last_insert_rowid(),
                container_id: schedule.container_id.clone(),
                scheduled_date: schedule.scheduled_date,
                operation_type: schedule.operation_type,
            }),
            Err(e) if is_unique_violation(&e) => {
                debug!(
                    "Container {} already booked on {}",
                    schedule.container_id,
                    format_date(schedule.scheduled_date)
                );
                None
            }
            Err(e) => return Err(e.into()),
        };
        conn.close().await?;
        Ok(stored)
    }

    async fn delete_schedule(&self, schedule_id: i64) -> Result<bool> {
        let mut conn = self.db.acquire().await?;
        let result = sqlx::query("DELETE FROM Schedule WHERE id = ?")
            .bind(schedule_id)
            .execute(&mut conn)
            .await?;
        conn.close().await?;

        Ok(result.rows_affected() > 0)
    }
}
