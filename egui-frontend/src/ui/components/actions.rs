//! # Actions Module
//!
//! Bridge between the widgets and the backend services.
//!
//! Every handler builds a command from the form buffers, runs the operation to
//! completion, and then either shows the error or applies the result: clear
//! the form, show the success notice, re-query the lists named by the
//! returned `RefreshScope`.
//!
//! Removals are driven by a `ReplayConfirmer`. When a run stops at a prompt
//! it has no answer for, the prompt is parked in `pending_confirmation`; the
//! confirmation window feeds the user's answer back through
//! [`ContainerTrackerApp::answer_confirmation`], which runs the removal again.

use log::{info, warn};

use container_tracker_backend::domain::commands::account::{AuthenticateCommand, RegisterCommand};
use container_tracker_backend::domain::commands::container::{
    AddContainerCommand, RemoveContainerCommand, RemoveContainerResult,
};
use container_tracker_backend::domain::commands::schedule::{
    CreateScheduleCommand, RemoveScheduleCommand, RemoveScheduleResult,
};
use container_tracker_backend::domain::{DomainError, DomainResult, ReplayConfirmer};
use shared::RefreshScope;

use crate::ui::app_state::{
    ContainerForm, ContainerTrackerApp, MainTab, PendingAction, PendingConfirmation, ScheduleForm,
};

impl ContainerTrackerApp {
    pub fn submit_register(&mut self) {
        let command = RegisterCommand {
            company_name: self.login_form.company_name.clone(),
            tax_id: self.login_form.tax_id.clone(),
            password: self.login_form.password.clone(),
        };

        match self.runtime.block_on(self.backend.account_service.register(command)) {
            Ok(result) => self.show_success(result.success_message),
            Err(e) => self.report_error(e),
        }
    }

    pub fn submit_login(&mut self) {
        let command = AuthenticateCommand {
            tax_id: self.login_form.tax_id.clone(),
            password: self.login_form.password.clone(),
        };

        match self.runtime.block_on(self.backend.account_service.authenticate(command)) {
            Ok(result) => {
                info!("Logged in as {}", result.account.company_name);
                self.account = Some(result.account);
                self.current_tab = MainTab::Containers;
                self.container_ids = result.containers.iter().map(|c| c.id.clone()).collect();
                self.containers = result.containers;
                self.schedules = result.schedules;
                self.login_form.password.clear();
            }
            Err(e) => self.report_error(e),
        }
    }

    pub fn submit_add_container(&mut self) {
        let form = &self.container_form;
        let command = AddContainerCommand {
            id: form.id.clone(),
            container_type: form.container_type,
            height: form.height.clone(),
            width: form.width.clone(),
            length: form.length.clone(),
            status: form.status,
            origin: form.origin.clone(),
            destination: form.destination.clone(),
        };

        match self.runtime.block_on(self.backend.container_service.add_container(command)) {
            Ok(result) => {
                self.container_form = ContainerForm::default();
                self.finish_mutation(result.refresh, result.success_message);
            }
            Err(e) => self.report_error(e),
        }
    }

    pub fn submit_create_schedule(&mut self) {
        let form = &self.schedule_form;
        let command = CreateScheduleCommand {
            container_id: form.container_id.clone().unwrap_or_default(),
            date: form.date.clone(),
            operation_type: form.operation_type,
        };

        match self.runtime.block_on(self.backend.schedule_service.create_schedule(command)) {
            Ok(result) => {
                self.schedule_form = ScheduleForm::default();
                self.finish_mutation(result.refresh, result.success_message);
            }
            Err(e) => self.report_error(e),
        }
    }

    /// Start removing the selected container
    pub fn request_remove_container(&mut self) {
        match self.selected_container.clone() {
            Some(container_id) => self.run_pending(PendingAction::RemoveContainer(container_id), Vec::new()),
            None => self.report_error(DomainError::NoSelection),
        }
    }

    /// Start removing the selected schedule
    pub fn request_remove_schedule(&mut self) {
        match self.selected_schedule {
            Some(schedule_id) => self.run_pending(PendingAction::RemoveSchedule(schedule_id), Vec::new()),
            None => self.report_error(DomainError::NoSelection),
        }
    }

    /// Record the answer to the open confirmation window and continue
    pub fn answer_confirmation(&mut self, confirmed: bool) {
        let Some(pending) = self.pending_confirmation.take() else {
            return;
        };

        if !confirmed {
            info!("User declined: {}", pending.prompt.message());
            return;
        }

        let mut answers = pending.answers;
        answers.push(true);
        self.run_pending(pending.action, answers);
    }

    fn run_pending(&mut self, action: PendingAction, answers: Vec<bool>) {
        let mut confirmer = ReplayConfirmer::new(answers.clone());

        let outcome = match &action {
            PendingAction::RemoveContainer(container_id) => {
                let command = RemoveContainerCommand {
                    selected_id: Some(container_id.clone()),
                };
                self.runtime
                    .block_on(self.backend.container_service.remove_container(command, &mut confirmer))
                    .map(|result| match result {
                        RemoveContainerResult::Removed {
                            success_message,
                            refresh,
                            ..
                        } => Some((success_message, refresh)),
                        RemoveContainerResult::Declined => None,
                    })
            }
            PendingAction::RemoveSchedule(schedule_id) => {
                let command = RemoveScheduleCommand {
                    selected_id: Some(*schedule_id),
                };
                self.runtime
                    .block_on(self.backend.schedule_service.remove_schedule(command, &mut confirmer))
                    .map(|result| match result {
                        RemoveScheduleResult::Removed {
                            success_message,
                            refresh,
                            ..
                        } => Some((success_message, refresh)),
                        RemoveScheduleResult::Declined => None,
                    })
            }
        };

        match outcome {
            Ok(Some((success_message, refresh))) => {
                match action {
                    PendingAction::RemoveContainer(_) => self.selected_container = None,
                    PendingAction::RemoveSchedule(_) => self.selected_schedule = None,
                }
                self.finish_mutation(refresh, success_message);
            }
            Ok(None) => {
                if let Some(prompt) = confirmer.take_pending() {
                    self.pending_confirmation = Some(PendingConfirmation {
                        action,
                        answers,
                        prompt,
                    });
                }
            }
            Err(e) => self.report_error(e),
        }
    }

    /// Re-query the changed lists; the success notice only shows if that worked
    fn finish_mutation(&mut self, scope: RefreshScope, success_message: String) {
        match self.refresh(scope) {
            Ok(()) => self.show_success(success_message),
            Err(e) => self.report_error(e),
        }
    }

    /// Re-query the lists an operation changed, stopping at the first failure
    pub fn refresh(&mut self, scope: RefreshScope) -> DomainResult<()> {
        if scope.is_empty() {
            return Ok(());
        }

        if scope.containers || scope.container_picker {
            let snapshot = self.runtime.block_on(self.backend.container_service.snapshot())?;
            if scope.containers {
                self.containers = snapshot.containers;
            }
            if scope.container_picker {
                self.set_container_ids(snapshot.container_ids);
            }
        }

        if scope.schedules {
            self.schedules = self.runtime.block_on(self.backend.schedule_service.list_schedules())?;
        }

        Ok(())
    }

    /// Reload only the container picker of the schedule form
    pub fn refresh_container_picker(&mut self) {
        match self.runtime.block_on(self.backend.container_service.list_container_ids()) {
            Ok(ids) => self.set_container_ids(ids),
            Err(e) => self.report_error(e),
        }
    }

    fn set_container_ids(&mut self, ids: Vec<String>) {
        if let Some(chosen) = &self.schedule_form.container_id {
            if !ids.contains(chosen) {
                self.schedule_form.container_id = None;
            }
        }
        if let Some(selected) = &self.selected_container {
            if !ids.contains(selected) {
                self.selected_container = None;
            }
        }
        self.container_ids = ids;
    }

    fn report_error(&mut self, error: DomainError) {
        warn!("Operation failed: {}", error);
        match error {
            DomainError::NoSelection => self.show_warning(error.to_string()),
            _ => self.show_error(error.to_string()),
        }
    }
}
