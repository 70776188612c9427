//! Domain-level command and result types.
//!
//! Each operation takes one command holding the raw form input and returns a
//! result carrying the success message and the lists the caller should
//! re-query. The presentation layer owns all display state; nothing here is
//! kept between calls.

pub mod account {
    use shared::{AccountProfile, Container, RefreshScope, Schedule};

    /// Input for registering the company account.
    #[derive(Debug, Clone, Default)]
    pub struct RegisterCommand {
        pub company_name: String,
        /// Masked or bare; separators are stripped before storing
        pub tax_id: String,
        pub password: String,
    }

    /// Result of a successful registration.
    #[derive(Debug, Clone)]
    pub struct RegisterResult {
        pub account: AccountProfile,
        pub success_message: String,
    }

    /// Input for logging in.
    #[derive(Debug, Clone, Default)]
    pub struct AuthenticateCommand {
        pub tax_id: String,
        pub password: String,
    }

    /// Result of a successful login, with the lists for the authenticated view.
    #[derive(Debug, Clone)]
    pub struct AuthenticateResult {
        pub account: AccountProfile,
        pub containers: Vec<Container>,
        pub schedules: Vec<Schedule>,
        pub refresh: RefreshScope,
    }
}

pub mod container {
    use shared::{Container, ContainerStatus, ContainerType, RefreshScope};

    /// Input for adding a container.
    ///
    /// Dimensions arrive as typed; pickers with nothing chosen are `None`.
    #[derive(Debug, Clone, Default)]
    pub struct AddContainerCommand {
        pub id: String,
        pub container_type: Option<ContainerType>,
        pub height: String,
        pub width: String,
        pub length: String,
        pub status: Option<ContainerStatus>,
        pub origin: String,
        pub destination: String,
    }

    #[derive(Debug, Clone)]
    pub struct AddContainerResult {
        pub container: Container,
        pub success_message: String,
        pub refresh: RefreshScope,
    }

    /// Input for removing the container selected in the table.
    #[derive(Debug, Clone, Default)]
    pub struct RemoveContainerCommand {
        pub selected_id: Option<String>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RemoveContainerResult {
        Removed {
            container_id: String,
            schedules_removed: u64,
            success_message: String,
            refresh: RefreshScope,
        },
        /// A confirmation was declined; nothing changed
        Declined,
    }

    /// Everything the authenticated view lists
    #[derive(Debug, Clone, Default)]
    pub struct WorkspaceSnapshot {
        pub containers: Vec<Container>,
        pub container_ids: Vec<String>,
    }
}

pub mod schedule {
    use shared::{OperationType, RefreshScope, Schedule};

    /// Input for booking an operation on a container.
    #[derive(Debug, Clone, Default)]
    pub struct CreateScheduleCommand {
        pub container_id: String,
        /// `DD/MM/YYYY` as produced by the date mask
        pub date: String,
        pub operation_type: Option<OperationType>,
    }

    #[derive(Debug, Clone)]
    pub struct CreateScheduleResult {
        pub schedule: Schedule,
        pub success_message: String,
        pub refresh: RefreshScope,
    }

    /// Input for removing the schedule selected in the table.
    #[derive(Debug, Clone, Default)]
    pub struct RemoveScheduleCommand {
        pub selected_id: Option<i64>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RemoveScheduleResult {
        Removed {
            schedule_id: i64,
            success_message: String,
            refresh: RefreshScope,
        },
        /// The confirmation was declined; nothing changed
        Declined,
    }
}
