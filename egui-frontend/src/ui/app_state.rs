//! # App State Module
//!
//! Central state of the desktop shell.
//!
//! The shell owns all display state: form buffers, the cached lists, the
//! current selections and whichever modal is open. The lists are disposable
//! copies of the store, re-queried after every mutation according to the
//! `RefreshScope` the backend returns.
//!
//! Backend operations are async; `runtime` drives each one to completion on
//! the UI thread, so no two operations ever overlap.

use anyhow::Result;
use container_tracker_backend::domain::ConfirmationPrompt;
use container_tracker_backend::Backend;
use log::info;
use shared::{AccountProfile, Container, ContainerStatus, ContainerType, OperationType, Schedule};
use tokio::runtime::Runtime;

use crate::ui::components::styling::setup_style;

/// Tabs of the authenticated view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainTab {
    Containers,
    Schedules,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub company_name: String,
    pub tax_id: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct ContainerForm {
    pub id: String,
    pub container_type: Option<ContainerType>,
    pub height: String,
    pub width: String,
    pub length: String,
    pub status: Option<ContainerStatus>,
    pub origin: String,
    pub destination: String,
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleForm {
    pub container_id: Option<String>,
    pub date: String,
    pub operation_type: Option<OperationType>,
}

/// Destructive operation waiting on a confirmation window
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    RemoveContainer(String),
    RemoveSchedule(i64),
}

/// An operation paused at a prompt, with the answers given so far
#[derive(Debug, Clone)]
pub struct PendingConfirmation {
    pub action: PendingAction,
    pub answers: Vec<bool>,
    pub prompt: ConfirmationPrompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

/// A message the user has to dismiss
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Main application struct for the egui container tracker
pub struct ContainerTrackerApp {
    pub backend: Backend,
    pub runtime: Runtime,

    // Session
    pub account: Option<AccountProfile>,
    pub current_tab: MainTab,

    // Forms
    pub login_form: LoginForm,
    pub container_form: ContainerForm,
    pub schedule_form: ScheduleForm,

    // Cached lists
    pub containers: Vec<Container>,
    pub container_ids: Vec<String>,
    pub schedules: Vec<Schedule>,

    // Selections
    pub selected_container: Option<String>,
    pub selected_schedule: Option<i64>,

    // Modals
    pub pending_confirmation: Option<PendingConfirmation>,
    pub notice: Option<Notice>,
}

impl ContainerTrackerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self> {
        setup_style(&cc.egui_ctx);

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        let backend = runtime.block_on(Backend::initialize())?;
        info!("Backend ready");

        Ok(Self::with_backend(backend, runtime))
    }

    /// Build the shell state around an opened backend
    pub fn with_backend(backend: Backend, runtime: Runtime) -> Self {
        Self {
            backend,
            runtime,

            account: None,
            current_tab: MainTab::Containers,

            login_form: LoginForm::default(),
            container_form: ContainerForm::default(),
            schedule_form: ScheduleForm::default(),

            containers: Vec::new(),
            container_ids: Vec::new(),
            schedules: Vec::new(),

            selected_container: None,
            selected_schedule: None,

            pending_confirmation: None,
            notice: None,
        }
    }

    /// True while a confirmation or notice window blocks the rest of the UI
    pub fn modal_open(&self) -> bool {
        self.pending_confirmation.is_some() || self.notice.is_some()
    }

    pub fn show_success(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice {
            kind: NoticeKind::Success,
            message: message.into(),
        });
    }

    pub fn show_warning(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice {
            kind: NoticeKind::Warning,
            message: message.into(),
        });
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice {
            kind: NoticeKind::Error,
            message: message.into(),
        });
    }
}
