use log::{info, warn};
use shared::{Container, RefreshScope};
use std::sync::Arc;

use super::clock::Clock;
use super::commands::container::{
    AddContainerCommand, AddContainerResult, RemoveContainerCommand, RemoveContainerResult,
    WorkspaceSnapshot,
};
use super::confirmation::{ConfirmationPrompt, Confirmer};
use super::errors::{DomainError, DomainResult};
use super::validation::{parse_dimensions, require_all_non_empty};
use crate::storage::{Connection, ContainerStorage, ScheduleStorage};

/// Service for adding, removing and listing containers
pub struct ContainerService<C: Connection> {
    containers: C::ContainerRepository,
    schedules: C::ScheduleRepository,
    clock: Arc<dyn Clock>,
}

impl<C: Connection> ContainerService<C> {
    pub fn new(connection: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            containers: connection.create_container_repository(),
            schedules: connection.create_schedule_repository(),
            clock,
        }
    }

    /// Add a container registered today
    pub async fn add_container(&self, command: AddContainerCommand) -> DomainResult<AddContainerResult> {
        let id = command.id.trim();
        let origin = command.origin.trim();
        let destination = command.destination.trim();
        let type_label = command.container_type.map(|t| t.as_str()).unwrap_or_default();
        let status_label = command.status.map(|s| s.as_str()).unwrap_or_default();

        require_all_non_empty(&[
            ("Container ID", id),
            ("Type", type_label),
            ("Height", command.height.as_str()),
            ("Width", command.width.as_str()),
            ("Length", command.length.as_str()),
            ("Status", status_label),
            ("Origin", origin),
            ("Destination", destination),
        ])?;

        let (height, width, length) = parse_dimensions(&command.height, &command.width, &command.length)?;

        let container_type = command
            .container_type
            .ok_or(DomainError::MissingField { field: "Type" })?;
        let status = command.status.ok_or(DomainError::MissingField { field: "Status" })?;

        if self.containers.find_container(id).await?.is_some() {
            warn!("Container {} already exists", id);
            return Err(DomainError::DuplicateKey {
                entity: "Container",
                key: id.to_string(),
            });
        }

        let container = Container {
            id: id.to_string(),
            container_type,
            height,
            width,
            length,
            status,
            origin: origin.to_string(),
            destination: destination.to_string(),
            entry_date: self.clock.today(),
        };

        if !self.containers.insert_container(&container).await? {
            return Err(DomainError::DuplicateKey {
                entity: "Container",
                key: container.id,
            });
        }

        info!("Added container {} ({})", container.id, container.container_type);

        Ok(AddContainerResult {
            container,
            success_message: "Container added successfully".to_string(),
            refresh: RefreshScope::CONTAINERS,
        })
    }

    /// Remove the selected container, cascading to its schedules.
    ///
    /// Asks before removing and asks again when schedules would go with it.
    /// Declining either question leaves both tables untouched.
    pub async fn remove_container(
        &self,
        command: RemoveContainerCommand,
        confirmer: &mut dyn Confirmer,
    ) -> DomainResult<RemoveContainerResult> {
        let container_id = match command.selected_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Err(DomainError::NoSelection),
        };

        let prompt = ConfirmationPrompt::RemoveContainer {
            container_id: container_id.clone(),
        };
        if !confirmer.confirm(&prompt) {
            info!("Removal of container {} declined", container_id);
            return Ok(RemoveContainerResult::Declined);
        }

        if self.containers.find_container(&container_id).await?.is_none() {
            warn!("Container {} no longer exists", container_id);
            return Err(DomainError::ContainerNotFound(container_id));
        }

        let schedule_count = self.schedules.list_schedules_for_container(&container_id).await?.len();
        if schedule_count > 0 {
            let prompt = ConfirmationPrompt::CascadeSchedules {
                container_id: container_id.clone(),
                schedule_count,
            };
            if !confirmer.confirm(&prompt) {
                info!("Cascade removal of {} schedules declined", schedule_count);
                return Ok(RemoveContainerResult::Declined);
            }
        }

        let removal = self.containers.delete_container_with_schedules(&container_id).await?;
        if !removal.container_deleted {
            return Err(DomainError::ContainerNotFound(container_id));
        }

        info!(
            "Removed container {} and {} schedules",
            container_id, removal.schedules_deleted
        );

        Ok(RemoveContainerResult::Removed {
            container_id,
            schedules_removed: removal.schedules_deleted,
            success_message: "Container removed successfully".to_string(),
            refresh: RefreshScope::ALL,
        })
    }

    pub async fn list_containers(&self) -> DomainResult<Vec<Container>> {
        Ok(self.containers.list_containers().await?)
    }

    /// IDs for the container picker of the schedule form
    pub async fn list_container_ids(&self) -> DomainResult<Vec<String>> {
        Ok(self.containers.list_container_ids().await?)
    }

    /// Container table and picker contents in one call
    pub async fn snapshot(&self) -> DomainResult<WorkspaceSnapshot> {
        let containers = self.containers.list_containers().await?;
        let container_ids = containers.iter().map(|c| c.id.clone()).collect();
        Ok(WorkspaceSnapshot {
            containers,
            container_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::storage::{ContainerRemoval, MemoryConnection};
    use chrono::NaiveDate;
    use shared::{ContainerStatus, ContainerType, NewSchedule, OperationType};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 5, 20).unwrap()
    }

    fn setup() -> (Arc<MemoryConnection>, ContainerService<MemoryConnection>) {
        let connection = Arc::new(MemoryConnection::new());
        let service = ContainerService::new(connection.clone(), Arc::new(FixedClock(today())));
        (connection, service)
    }

    fn dry(id: &str) -> AddContainerCommand {
        AddContainerCommand {
            id: id.to_string(),
            container_type: Some(ContainerType::Dry),
            height: "2.5".to_string(),
            width: "2.3".to_string(),
            length: "6.0".to_string(),
            status: Some(ContainerStatus::Available),
            origin: "X".to_string(),
            destination: "Y".to_string(),
        }
    }

    async fn book(connection: &MemoryConnection, container_id: &str, day: u32) {
        connection
            .create_schedule_repository()
            .insert_schedule(&NewSchedule {
                container_id: container_id.to_string(),
                scheduled_date: NaiveDate::from_ymd_opt(2030, 6, day).unwrap(),
                operation_type: OperationType::Loading,
            })
            .await
            .unwrap();
    }

    fn remove(id: &str) -> RemoveContainerCommand {
        RemoveContainerCommand {
            selected_id: Some(id.to_string()),
        }
    }

    #[tokio::test]
    async fn test_add_container_sets_entry_date_to_today() {
        let (_connection, service) = setup();

        let result = service.add_container(dry(" C1 ")).await.unwrap();
        assert_eq!(result.container.id, "C1");
        assert_eq!(result.container.entry_date, today());
        assert_eq!((result.container.height, result.container.width, result.container.length), (2.5, 2.3, 6.0));
        assert_eq!(result.refresh, RefreshScope::CONTAINERS);

        assert_eq!(service.list_container_ids().await.unwrap(), vec!["C1"]);
    }

    #[tokio::test]
    async fn test_add_container_requires_every_field() {
        let (_connection, service) = setup();

        let mut command = dry("C1");
        command.origin = " ".to_string();
        assert!(matches!(
            service.add_container(command).await,
            Err(DomainError::MissingField { field: "Origin" })
        ));

        let mut command = dry("C1");
        command.status = None;
        assert!(matches!(
            service.add_container(command).await,
            Err(DomainError::MissingField { field: "Status" })
        ));

        assert!(service.list_containers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_container_rejects_bad_dimensions() {
        let (_connection, service) = setup();

        let mut command = dry("C1");
        command.length = "six".to_string();
        assert!(matches!(
            service.add_container(command).await,
            Err(DomainError::InvalidNumber { field: "Length" })
        ));
    }

    #[tokio::test]
    async fn test_duplicate_container_leaves_store_unchanged() {
        let (_connection, service) = setup();
        service.add_container(dry("C1")).await.unwrap();
        let before = service.list_containers().await.unwrap();

        let mut again = dry("C1");
        again.origin = "Elsewhere".to_string();
        assert!(matches!(
            service.add_container(again).await,
            Err(DomainError::DuplicateKey { entity: "Container", .. })
        ));

        assert_eq!(service.list_containers().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_remove_without_selection() {
        let (_connection, service) = setup();
        let mut asked = false;
        let mut confirmer = |_: &ConfirmationPrompt| {
            asked = true;
            true
        };

        let result = service
            .remove_container(RemoveContainerCommand::default(), &mut confirmer)
            .await;
        assert!(matches!(result, Err(DomainError::NoSelection)));

        let result = service
            .remove_container(RemoveContainerCommand { selected_id: Some(String::new()) }, &mut confirmer)
            .await;
        assert!(matches!(result, Err(DomainError::NoSelection)));
        assert!(!asked);
    }

    #[tokio::test]
    async fn test_remove_container_without_schedules_asks_once() {
        let (_connection, service) = setup();
        service.add_container(dry("C1")).await.unwrap();

        let mut prompts = Vec::new();
        let mut confirmer = |prompt: &ConfirmationPrompt| {
            prompts.push(prompt.clone());
            true
        };
        let result = service.remove_container(remove("C1"), &mut confirmer).await.unwrap();

        assert_eq!(
            result,
            RemoveContainerResult::Removed {
                container_id: "C1".to_string(),
                schedules_removed: 0,
                success_message: "Container removed successfully".to_string(),
                refresh: RefreshScope::ALL,
            }
        );
        assert_eq!(prompts.len(), 1);
        assert!(service.list_containers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_declining_first_confirmation_is_a_no_op() {
        let (connection, service) = setup();
        service.add_container(dry("C1")).await.unwrap();
        book(&connection, "C1", 1).await;

        let result = service
            .remove_container(remove("C1"), &mut |_: &ConfirmationPrompt| false)
            .await
            .unwrap();

        assert_eq!(result, RemoveContainerResult::Declined);
        assert_eq!(service.list_containers().await.unwrap().len(), 1);
        assert_eq!(connection.create_schedule_repository().list_schedules().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_declining_cascade_deletes_nothing() {
        let (connection, service) = setup();
        service.add_container(dry("C1")).await.unwrap();
        book(&connection, "C1", 1).await;
        book(&connection, "C1", 2).await;

        let mut prompts = Vec::new();
        let mut confirmer = |prompt: &ConfirmationPrompt| {
            prompts.push(prompt.clone());
            matches!(prompt, ConfirmationPrompt::RemoveContainer { .. })
        };
        let result = service.remove_container(remove("C1"), &mut confirmer).await.unwrap();

        assert_eq!(result, RemoveContainerResult::Declined);
        assert_eq!(
            prompts[1],
            ConfirmationPrompt::CascadeSchedules {
                container_id: "C1".to_string(),
                schedule_count: 2,
            }
        );
        assert_eq!(service.list_containers().await.unwrap().len(), 1);
        assert_eq!(connection.create_schedule_repository().list_schedules().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_confirmed_cascade_removes_container_and_schedules() {
        let (connection, service) = setup();
        service.add_container(dry("C1")).await.unwrap();
        service.add_container(dry("C2")).await.unwrap();
        book(&connection, "C1", 1).await;
        book(&connection, "C2", 1).await;

        let result = service
            .remove_container(remove("C1"), &mut |_: &ConfirmationPrompt| true)
            .await
            .unwrap();

        assert!(matches!(result, RemoveContainerResult::Removed { schedules_removed: 1, .. }));
        let schedules = connection.create_schedule_repository().list_schedules().await.unwrap();
        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0].container_id, "C2");
        assert_eq!(service.list_container_ids().await.unwrap(), vec!["C2"]);
    }

    #[tokio::test]
    async fn test_remove_stale_selection() {
        let (_connection, service) = setup();

        let result = service
            .remove_container(remove("GONE"), &mut |_: &ConfirmationPrompt| true)
            .await;
        assert!(matches!(result, Err(DomainError::ContainerNotFound(id)) if id == "GONE"));
    }

    #[tokio::test]
    async fn test_snapshot_lists_table_and_picker() {
        let (connection, service) = setup();
        service.add_container(dry("C1")).await.unwrap();
        service.add_container(dry("C2")).await.unwrap();

        let snapshot = service.snapshot().await.unwrap();
        assert_eq!(snapshot.container_ids, vec!["C1", "C2"]);
        assert_eq!(snapshot.containers.len(), 2);

        let removal = connection
            .create_container_repository()
            .delete_container_with_schedules("C1")
            .await
            .unwrap();
        assert_eq!(
            removal,
            ContainerRemoval {
                container_deleted: true,
                schedules_deleted: 0,
            }
        );
        assert_eq!(service.snapshot().await.unwrap().container_ids, vec!["C2"]);
    }
}
