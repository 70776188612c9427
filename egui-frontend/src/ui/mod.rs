pub mod app_coordinator;
pub mod app_state;
pub mod components;

pub use app_state::*;
