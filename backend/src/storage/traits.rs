//! # Storage Traits
//!
//! This module defines the persistence gateway the domain layer talks to.
//! Each entity gets a narrow find/insert/delete/list interface so the domain
//! services can run against SQLite or against the in-memory fake.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{Account, Container, NewSchedule, Schedule};

/// Rows removed by a cascading container delete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainerRemoval {
    /// Whether the container row existed and was deleted
    pub container_deleted: bool,
    /// Number of dependent schedules deleted with it
    pub schedules_deleted: u64,
}

/// Trait defining the interface for account storage operations
#[async_trait]
pub trait AccountStorage: Send + Sync {
    /// Retrieve an account by its tax ID
    async fn find_account(&self, tax_id: &str) -> Result<Option<Account>>;

    /// Retrieve an account matching both tax ID and password exactly
    async fn find_account_by_credentials(&self, tax_id: &str, password: &str) -> Result<Option<Account>>;

    /// Store a new account
    /// Returns false if an account with the same tax ID already exists
    async fn insert_account(&self, account: &Account) -> Result<bool>;
}

/// Trait defining the interface for container storage operations
#[async_trait]
pub trait ContainerStorage: Send + Sync {
    /// Retrieve a container by ID
    async fn find_container(&self, container_id: &str) -> Result<Option<Container>>;

    /// List all containers in insertion order
    async fn list_containers(&self) -> Result<Vec<Container>>;

    /// List the IDs of all containers, for the schedule form picker
    async fn list_container_ids(&self) -> Result<Vec<String>>;

    /// Store a new container
    /// Returns false if a container with the same ID already exists
    async fn insert_container(&self, container: &Container) -> Result<bool>;

    /// Delete a container together with all of its schedules.
    /// Both deletes commit together or not at all.
    async fn delete_container_with_schedules(&self, container_id: &str) -> Result<ContainerRemoval>;
}

/// Trait defining the interface for schedule storage operations
#[async_trait]
pub trait ScheduleStorage: Send + Sync {
    /// Retrieve a schedule by ID
    async fn find_schedule(&self, schedule_id: i64) -> Result<Option<Schedule>>;

    /// List all schedules ordered by ID
    async fn list_schedules(&self) -> Result<Vec<Schedule>>;

    /// List the schedules that reference a container
    async fn list_schedules_for_container(&self, container_id: &str) -> Result<Vec<Schedule>>;

    /// Retrieve the schedule booked for a container on a given day
    async fn find_schedule_for_date(&self, container_id: &str, date: NaiveDate) -> Result<Option<Schedule>>;

    /// Store a new schedule and return it with its assigned ID
    /// Returns None if the container already has a schedule on that day
    async fn insert_schedule(&self, schedule: &NewSchedule) -> Result<Option<Schedule>>;

    /// Delete a single schedule
    /// Returns true if the schedule was found and deleted, false otherwise
    async fn delete_schedule(&self, schedule_id: i64) -> Result<bool>;
}

/// Trait defining the interface for storage connections
///
/// Abstracts the backend (SQLite, in-memory) and provides factory methods for
/// the repositories, so the domain layer never names a concrete store.
pub trait Connection: Send + Sync + 'static {
    type AccountRepository: AccountStorage + Clone;
    type ContainerRepository: ContainerStorage + Clone;
    type ScheduleRepository: ScheduleStorage + Clone;

    fn create_account_repository(&self) -> Self::AccountRepository;
    fn create_container_repository(&self) -> Self::ContainerRepository;
    fn create_schedule_repository(&self) -> Self::ScheduleRepository;
}
