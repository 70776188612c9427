//! # UI Components Module
//!
//! - `actions` - calls into the backend and applies the results to app state
//! - `styling` - global egui style and notice colors
//! - `masked_field` - text edits driven by the tax ID and date masks
//! - `login_view` - register and login form
//! - `containers_tab` - container form and table
//! - `schedules_tab` - schedule form and table
//! - `modals` - confirmation and notice windows

pub mod actions;
pub mod containers_tab;
pub mod login_view;
pub mod masked_field;
pub mod modals;
pub mod schedules_tab;
pub mod styling;

pub use masked_field::masked_text_edit;
