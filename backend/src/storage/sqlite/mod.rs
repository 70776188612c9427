//! # SQLite Storage Module
//!
//! SQLite implementation of the persistence gateway, built on SQLx.
//!
//! ## Components
//!
//! - **connection.rs** - connect options, per-operation connections, schema setup
//! - **account_repository.rs** - `Account` table
//! - **container_repository.rs** - `Container` table and cascading delete
//! - **schedule_repository.rs** - `Schedule` table
//!
//! Dates are stored as `DD/MM/YYYY` text and enum values as their display
//! labels, so the file stays readable with any SQLite browser.

pub mod account_repository;
pub mod connection;
pub mod container_repository;
pub mod schedule_repository;

pub use account_repository::AccountRepository;
pub use connection::DbConnection;
pub use container_repository::ContainerRepository;
pub use schedule_repository::ScheduleRepository;
