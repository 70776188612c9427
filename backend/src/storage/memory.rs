//! # In-Memory Storage
//!
//! A fake persistence gateway holding all three tables in a `Vec` behind a
//! mutex. It mirrors the SQLite behaviour the domain relies on: key
//! uniqueness, one schedule per container per day, the schedule foreign key,
//! and increasing schedule IDs. Domain tests run against it without touching
//! the filesystem.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{Account, Container, NewSchedule, Schedule};
use std::sync::{Arc, Mutex, MutexGuard};

use super::traits::{
    AccountStorage, Connection, ContainerRemoval, ContainerStorage, ScheduleStorage,
};

#[derive(Debug, Default)]
struct MemoryTables {
    accounts: Vec<Account>,
    containers: Vec<Container>,
    schedules: Vec<Schedule>,
    last_schedule_id: i64,
}

type SharedTables = Arc<Mutex<MemoryTables>>;

fn lock(tables: &SharedTables) -> Result<MutexGuard<'_, MemoryTables>> {
    tables.lock().map_err(|_| anyhow!("In-memory store lock poisoned"))
}

/// Connection to a store that lives only as long as its clones
#[derive(Clone, Default)]
pub struct MemoryConnection {
    tables: SharedTables,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Connection for MemoryConnection {
    type AccountRepository = MemoryAccountRepository;
    type ContainerRepository = MemoryContainerRepository;
    type ScheduleRepository = MemoryScheduleRepository;

    fn create_account_repository(&self) -> Self::AccountRepository {
        MemoryAccountRepository {
            tables: self.tables.clone(),
        }
    }

    fn create_container_repository(&self) -> Self::ContainerRepository {
        MemoryContainerRepository {
            tables: self.tables.clone(),
        }
    }

    fn create_schedule_repository(&self) -> Self::ScheduleRepository {
        MemoryScheduleRepository {
            tables: self.tables.clone(),
        }
    }
}

#[derive(Clone)]
pub struct MemoryAccountRepository {
    tables: SharedTables,
}

#[async_trait]
impl AccountStorage for MemoryAccountRepository {
    async fn find_account(&self, tax_id: &str) -> Result<Option<Account>> {
        let tables = lock(&self.tables)?;
        Ok(tables.accounts.iter().find(|a| a.tax_id == tax_id).cloned())
    }

    async fn find_account_by_credentials(&self, tax_id: &str, password: &str) -> Result<Option<Account>> {
        let tables = lock(&self.tables)?;
        Ok(tables
            .accounts
            .iter()
            .find(|a| a.tax_id == tax_id && a.password == password)
            .cloned())
    }

    async fn insert_account(&self, account: &Account) -> Result<bool> {
        let mut tables = lock(&self.tables)?;
        if tables.accounts.iter().any(|a| a.tax_id == account.tax_id) {
            return Ok(false);
        }
        tables.accounts.push(account.clone());
        Ok(true)
    }
}

#[derive(Clone)]
pub struct MemoryContainerRepository {
    tables: SharedTables,
}

#[async_trait]
impl ContainerStorage for MemoryContainerRepository {
    async fn find_container(&self, container_id: &str) -> Result<Option<Container>> {
        let tables = lock(&self.tables)?;
        Ok(tables.containers.iter().find(|c| c.id == container_id).cloned())
    }

    async fn list_containers(&self) -> Result<Vec<Container>> {
        Ok(lock(&self.tables)?.containers.clone())
    }

    async fn list_container_ids(&self) -> Result<Vec<String>> {
        let tables = lock(&self.tables)?;
        Ok(tables.containers.iter().map(|c| c.id.clone()).collect())
    }

    async fn insert_container(&self, container: &Container) -> Result<bool> {
        let mut tables = lock(&self.tables)?;
        if tables.containers.iter().any(|c| c.id == container.id) {
            return Ok(false);
        }
        tables.containers.push(container.clone());
        Ok(true)
    }

    async fn delete_container_with_schedules(&self, container_id: &str) -> Result<ContainerRemoval> {
        let mut tables = lock(&self.tables)?;

        let schedules_before = tables.schedules.len();
        tables.schedules.retain(|s| s.container_id != container_id);
        let schedules_deleted = (schedules_before - tables.schedules.len()) as u64;

        let containers_before = tables.containers.len();
        tables.containers.retain(|c| c.id != container_id);

        Ok(ContainerRemoval {
            container_deleted: tables.containers.len() < containers_before,
            schedules_deleted,
        })
    }
}

#[derive(Clone)]
pub struct MemoryScheduleRepository {
    tables: SharedTables,
}

#[async_trait]
impl ScheduleStorage for MemoryScheduleRepository {
    async fn find_schedule(&self, schedule_id: i64) -> Result<Option<Schedule>> {
        let tables = lock(&self.tables)?;
        Ok(tables.schedules.iter().find(|s| s.id == schedule_id).cloned())
    }

    async fn list_schedules(&self) -> Result<Vec<Schedule>> {
        Ok(lock(&self.tables)?.schedules.clone())
    }

    async fn list_schedules_for_container(&self, container_id: &str) -> Result<Vec<Schedule>> {
        let tables = lock(&self.tables)?;
        Ok(tables
            .schedules
            .iter()
            .filter(|s| s.container_id == container_id)
            .cloned()
            .collect())
    }

    async fn find_schedule_for_date(&self, container_id: &str, date: NaiveDate) -> Result<Option<Schedule>> {
        let tables = lock(&self.tables)?;
        Ok(tables
            .schedules
            .iter()
            .find(|s| s.container_id == container_id && s.scheduled_date == date)
            .cloned())
    }

    async fn insert_schedule(&self, schedule: &NewSchedule) -> Result<Option<Schedule>> {
        let mut tables = lock(&self.tables)?;

        if !tables.containers.iter().any(|c| c.id == schedule.container_id) {
            return Err(anyhow!(
                "FOREIGN KEY constraint failed: container {} does not exist",
                schedule.container_id
            ));
        }
        if tables
            .schedules
            .iter()
            .any(|s| s.container_id == schedule.container_id && s.scheduled_date == schedule.scheduled_date)
        {
            return Ok(None);
        }

        tables.last_schedule_id += 1;
        let stored = Schedule {
            id: tables.last_schedule_id,
            container_id: schedule.container_id.clone(),
            scheduled_date: schedule.scheduled_date,
            operation_type: schedule.operation_type,
        };
        tables.schedules.push(stored.clone());
        Ok(Some(stored))
    }

    async fn delete_schedule(&self, schedule_id: i64) -> Result<bool> {
        let mut tables = lock(&self.tables)?;
        let before = tables.schedules.len();
        tables.schedules.retain(|s| s.id != schedule_id);
        Ok(tables.schedules.len() < before)
    }
}
