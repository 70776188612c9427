//! Typed failures of the domain operations.
//!
//! Every variant is terminal for the operation that produced it. The display
//! text is what the shell shows in its error notice.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("All fields are required ({field} is empty)")]
    MissingField { field: &'static str },

    #[error("Invalid tax ID: expected 14 digits")]
    InvalidFormat,

    #[error("{entity} '{key}' already exists")]
    DuplicateKey { entity: &'static str, key: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{field} must be a valid number")]
    InvalidNumber { field: &'static str },

    #[error("Invalid date: expected DD/MM/YYYY")]
    InvalidDate,

    #[error("Date cannot be in the past")]
    PastDate,

    #[error("Container {container_id} already has a schedule on {date}")]
    ScheduleConflict { container_id: String, date: String },

    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Schedule not found: {0}")]
    ScheduleNotFound(i64),

    #[error("Select an item to remove first")]
    NoSelection,

    #[error(transparent)]
    StoreError(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
