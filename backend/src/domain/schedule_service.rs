use log::{info, warn};
use shared::{format_date, NewSchedule, RefreshScope, Schedule};
use std::sync::Arc;

use super::clock::Clock;
use super::commands::schedule::{
    CreateScheduleCommand, CreateScheduleResult, RemoveScheduleCommand, RemoveScheduleResult,
};
use super::confirmation::{ConfirmationPrompt, Confirmer};
use super::errors::{DomainError, DomainResult};
use super::validation::{date_not_in_past, parse_date, require_all_non_empty};
use crate::storage::{Connection, ContainerStorage, ScheduleStorage};

/// Service for booking and cancelling container operations
pub struct ScheduleService<C: Connection> {
    containers: C::ContainerRepository,
    schedules: C::ScheduleRepository,
    clock: Arc<dyn Clock>,
}

impl<C: Connection> ScheduleService<C> {
    pub fn new(connection: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            containers: connection.create_container_repository(),
            schedules: connection.create_schedule_repository(),
            clock,
        }
    }

    /// Book an operation on a container for today or a later day
    pub async fn create_schedule(&self, command: CreateScheduleCommand) -> DomainResult<CreateScheduleResult> {
        let container_id = command.container_id.trim();
        let date = command.date.trim();

        let operation_label = command.operation_type.map(|op| op.as_str()).unwrap_or_default();

        require_all_non_empty(&[
            ("Container", container_id),
            ("Date", date),
            ("Operation", operation_label),
        ])?;
        let operation_type = command
            .operation_type
            .ok_or(DomainError::MissingField { field: "Operation" })?;

        let scheduled_date = parse_date(date).ok_or(DomainError::InvalidDate)?;

        if !date_not_in_past(scheduled_date, self.clock.today()) {
            warn!("Rejected schedule in the past: {}", date);
            return Err(DomainError::PastDate);
        }

        if self.containers.find_container(container_id).await?.is_none() {
            warn!("Cannot schedule unknown container {}", container_id);
            return Err(DomainError::ContainerNotFound(container_id.to_string()));
        }

        let conflict = || DomainError::ScheduleConflict {
            container_id: container_id.to_string(),
            date: format_date(scheduled_date),
        };

        if self
            .schedules
            .find_schedule_for_date(container_id, scheduled_date)
            .await?
            .is_some()
        {
            warn!("Container {} already booked on {}", container_id, format_date(scheduled_date));
            return Err(conflict());
        }

        let schedule = self
            .schedules
            .insert_schedule(&NewSchedule {
                container_id: container_id.to_string(),
                scheduled_date,
                operation_type,
            })
            .await?
            .ok_or_else(conflict)?;

        info!(
            "Created schedule {}: {} on {} for {}",
            schedule.id,
            schedule.operation_type,
            format_date(schedule.scheduled_date),
            schedule.container_id
        );

        Ok(CreateScheduleResult {
            schedule,
            success_message: "Schedule created successfully".to_string(),
            refresh: RefreshScope::SCHEDULES,
        })
    }

    /// Remove the selected schedule after confirmation
    pub async fn remove_schedule(
        &self,
        command: RemoveScheduleCommand,
        confirmer: &mut dyn Confirmer,
    ) -> DomainResult<RemoveScheduleResult> {
        let schedule_id = command.selected_id.ok_or(DomainError::NoSelection)?;

        if !confirmer.confirm(&ConfirmationPrompt::RemoveSchedule { schedule_id }) {
            info!("Removal of schedule {} declined", schedule_id);
            return Ok(RemoveScheduleResult::Declined);
        }

        if !self.schedules.delete_schedule(schedule_id).await? {
            warn!("Schedule {} no longer exists", schedule_id);
            return Err(DomainError::ScheduleNotFound(schedule_id));
        }

        info!("Removed schedule {}", schedule_id);

        Ok(RemoveScheduleResult::Removed {
            schedule_id,
            success_message: "Schedule removed successfully".to_string(),
            refresh: RefreshScope::SCHEDULES,
        })
    }

    pub async fn list_schedules(&self) -> DomainResult<Vec<Schedule>> {
        Ok(self.schedules.list_schedules().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::storage::test_utils::sample_container;
    use crate::storage::MemoryConnection;
    use chrono::NaiveDate;
    use shared::OperationType;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 5, 20).unwrap()
    }

    async fn setup() -> ScheduleService<MemoryConnection> {
        let connection = Arc::new(MemoryConnection::new());
        connection
            .create_container_repository()
            .insert_container(&sample_container("C1"))
            .await
            .unwrap();
        ScheduleService::new(connection, Arc::new(FixedClock(today())))
    }

    fn booking(container_id: &str, date: &str, operation_type: OperationType) -> CreateScheduleCommand {
        CreateScheduleCommand {
            container_id: container_id.to_string(),
            date: date.to_string(),
            operation_type: Some(operation_type),
        }
    }

    #[tokio::test]
    async fn test_create_schedule() {
        let service = setup().await;

        let result = service
            .create_schedule(booking("C1", "01/06/2030", OperationType::Loading))
            .await
            .unwrap();

        assert_eq!(result.schedule.container_id, "C1");
        assert_eq!(result.schedule.scheduled_date, NaiveDate::from_ymd_opt(2030, 6, 1).unwrap());
        assert_eq!(result.refresh, RefreshScope::SCHEDULES);
        assert_eq!(service.list_schedules().await.unwrap(), vec![result.schedule]);
    }

    #[tokio::test]
    async fn test_today_is_not_in_the_past() {
        let service = setup().await;
        assert!(service
            .create_schedule(booking("C1", "20/05/2030", OperationType::Maintenance))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_create_schedule_checks_in_order() {
        let service = setup().await;

        let mut missing = booking("C1", "01/06/2030", OperationType::Loading);
        missing.operation_type = None;
        assert!(matches!(
            service.create_schedule(missing).await,
            Err(DomainError::MissingField { field: "Operation" })
        ));
        assert!(matches!(
            service.create_schedule(booking("", "01/06/2030", OperationType::Loading)).await,
            Err(DomainError::MissingField { field: "Container" })
        ));
        assert!(matches!(
            service.create_schedule(booking("C1", "31/02/2031", OperationType::Loading)).await,
            Err(DomainError::InvalidDate)
        ));
        assert!(matches!(
            service.create_schedule(booking("C1", "19/05/2030", OperationType::Loading)).await,
            Err(DomainError::PastDate)
        ));
        assert!(matches!(
            service.create_schedule(booking("C9", "19/05/2030", OperationType::Loading)).await,
            Err(DomainError::PastDate)
        ));
        assert!(matches!(
            service.create_schedule(booking("C9", "01/06/2030", OperationType::Loading)).await,
            Err(DomainError::ContainerNotFound(id)) if id == "C9"
        ));

        assert!(service.list_schedules().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_second_booking_on_same_day_conflicts() {
        let service = setup().await;
        service
            .create_schedule(booking("C1", "01/06/2030", OperationType::Loading))
            .await
            .unwrap();

        let result = service
            .create_schedule(booking("C1", "1/6/2030", OperationType::Unloading))
            .await;
        assert!(matches!(
            result,
            Err(DomainError::ScheduleConflict { ref date, .. }) if date == "01/06/2030"
        ));
        assert_eq!(service.list_schedules().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_schedule() {
        let service = setup().await;
        let created = service
            .create_schedule(booking("C1", "01/06/2030", OperationType::Loading))
            .await
            .unwrap();

        let mut prompts = Vec::new();
        let mut confirmer = |prompt: &ConfirmationPrompt| {
            prompts.push(prompt.clone());
            true
        };
        let result = service
            .remove_schedule(
                RemoveScheduleCommand {
                    selected_id: Some(created.schedule.id),
                },
                &mut confirmer,
            )
            .await
            .unwrap();

        assert!(matches!(result, RemoveScheduleResult::Removed { schedule_id, .. } if schedule_id == created.schedule.id));
        assert_eq!(
            prompts,
            vec![ConfirmationPrompt::RemoveSchedule {
                schedule_id: created.schedule.id
            }]
        );
        assert!(service.list_schedules().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_schedule_declined_or_unselected() {
        let service = setup().await;
        let created = service
            .create_schedule(booking("C1", "01/06/2030", OperationType::Loading))
            .await
            .unwrap();
        let selected = RemoveScheduleCommand {
            selected_id: Some(created.schedule.id),
        };

        let result = service
            .remove_schedule(selected, &mut |_: &ConfirmationPrompt| false)
            .await
            .unwrap();
        assert_eq!(result, RemoveScheduleResult::Declined);
        assert_eq!(service.list_schedules().await.unwrap().len(), 1);

        let result = service
            .remove_schedule(RemoveScheduleCommand::default(), &mut |_: &ConfirmationPrompt| true)
            .await;
        assert!(matches!(result, Err(DomainError::NoSelection)));
    }

    #[tokio::test]
    async fn test_remove_stale_schedule() {
        let service = setup().await;

        let result = service
            .remove_schedule(RemoveScheduleCommand { selected_id: Some(42) }, &mut |_: &ConfirmationPrompt| true)
            .await;
        assert!(matches!(result, Err(DomainError::ScheduleNotFound(42))));
    }
}
