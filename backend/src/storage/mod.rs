//! # Storage Module
//!
//! Handles all data persistence for the container tracker.
//!
//! The domain layer only sees the traits in [`traits`]; the concrete store is
//! picked when the [`crate::Backend`] is wired.
//!
//! ## Current Implementation
//!
//! - **Primary Storage**: SQLite file through SQLx, one connection per operation
//! - **Testing**: an in-memory fake with the same behaviour
//!
//! ## Design Principles
//!
//! - **Repository Pattern**: one repository per table
//! - **Dependency Inversion**: domain depends on storage abstractions, not implementations
//! - **Scoped connections**: a connection never outlives the call that opened it

pub mod memory;
pub mod sqlite;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use memory::MemoryConnection;
pub use sqlite::{AccountRepository, ContainerRepository, DbConnection, ScheduleRepository};
pub use traits::{AccountStorage, Connection, ContainerRemoval, ContainerStorage, ScheduleStorage};
