//! # Domain Module
//!
//! Contains the business rules of the container tracker.
//!
//! The domain layer turns raw form input into validated records and decides
//! what the store may do with them. It knows nothing about egui or SQLite:
//! services talk to storage through the traits in [`crate::storage`] and to
//! the user through [`Confirmer`].
//!
//! ## Module Organization
//!
//! - **validation**: required fields, dimension parsing, tax ID and date rules
//! - **input_mask**: keystroke masks for the tax ID and date fields
//! - **clock**: where "today" comes from
//! - **confirmation**: prompts for destructive operations
//! - **commands**: request and result types for every operation
//! - **account_service**, **container_service**, **schedule_service**: the operations
//!
//! ## Business Rules
//!
//! - A tax ID is 14 digits; separators are accepted on input and dropped
//! - Container IDs are unique; a container's entry date is the day it was added
//! - A container has at most one schedule per day, and never in the past
//! - Removing a container with schedules needs a second confirmation

pub mod account_service;
pub mod clock;
pub mod commands;
pub mod confirmation;
pub mod container_service;
pub mod errors;
pub mod input_mask;
pub mod schedule_service;
pub mod validation;

pub use account_service::AccountService;
pub use clock::{Clock, FixedClock, SystemClock};
pub use confirmation::{ConfirmationPrompt, Confirmer, ReplayConfirmer};
pub use container_service::ContainerService;
pub use errors::{DomainError, DomainResult};
pub use input_mask::{InputMask, MaskedText};
pub use schedule_service::ScheduleService;
