//! # Container Tracker Backend
//!
//! Contains all non-UI logic for the container tracker application.
//!
//! This crate brings together:
//! - **Domain**: validation, input masks and the register/login, container and
//!   schedule operations
//! - **Storage**: the persistence gateway and its SQLite implementation
//! - **Config**: where the data lives and which database file to open
//!
//! The backend is UI-agnostic. Every operation takes an explicit command,
//! returns a result or a typed error, and reports which lists the caller
//! should re-query.
//!
//! ## Architecture
//!
//! ```text
//! Presentation shell (egui)
//!     ↓
//! Domain layer (services, validation, input masks)
//!     ↓
//! Storage layer (gateway traits, SQLite)
//! ```

pub mod config;
pub mod domain;
pub mod storage;

use anyhow::Result;
use log::info;
use std::path::Path;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::{AccountService, Clock, ContainerService, ScheduleService, SystemClock};
use crate::storage::{Connection, DbConnection};

/// Main backend struct that holds all services
pub struct Backend<C: Connection = DbConnection> {
    pub account_service: AccountService<C>,
    pub container_service: ContainerService<C>,
    pub schedule_service: ScheduleService<C>,
}

impl Backend<DbConnection> {
    /// Initialize the backend in the default data directory
    pub async fn initialize() -> Result<Self> {
        let data_directory = config::default_data_directory();
        Self::open(&data_directory).await
    }

    /// Initialize the backend in a specific data directory
    pub async fn open(data_directory: &Path) -> Result<Self> {
        info!("Loading configuration from {}", data_directory.display());
        let config = AppConfig::load_or_create(data_directory)?;

        let database_path = config.database_path(data_directory);
        info!("Setting up database at {}", database_path.display());
        let connection = DbConnection::new(&database_path).await?;

        Ok(Self::with_connection(Arc::new(connection), Arc::new(SystemClock)))
    }
}

impl<C: Connection> Backend<C> {
    /// Wire the services to an already opened connection
    pub fn with_connection(connection: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        info!("Setting up domain services");
        Self {
            account_service: AccountService::new(connection.clone()),
            container_service: ContainerService::new(connection.clone(), clock.clone()),
            schedule_service: ScheduleService::new(connection, clock),
        }
    }
}
