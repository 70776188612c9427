//! Register, log in, add a container, book it and remove it with its
//! schedule, against a real SQLite file in a throwaway data directory.

use chrono::{Days, Local};
use container_tracker_backend::domain::commands::account::{AuthenticateCommand, RegisterCommand};
use container_tracker_backend::domain::commands::container::{
    AddContainerCommand, RemoveContainerCommand, RemoveContainerResult,
};
use container_tracker_backend::domain::commands::schedule::CreateScheduleCommand;
use container_tracker_backend::domain::{ConfirmationPrompt, DomainError, ReplayConfirmer};
use container_tracker_backend::Backend;
use shared::{format_date, ContainerStatus, ContainerType, OperationType, RefreshScope};
use tempfile::TempDir;

fn add_c1() -> AddContainerCommand {
    AddContainerCommand {
        id: "C1".to_string(),
        container_type: Some(ContainerType::Dry),
        height: "2.5".to_string(),
        width: "2.3".to_string(),
        length: "6.0".to_string(),
        status: Some(ContainerStatus::Available),
        origin: "X".to_string(),
        destination: "Y".to_string(),
    }
}

#[tokio::test]
async fn test_full_session_against_sqlite() {
    let data_directory = TempDir::new().unwrap();
    let backend = Backend::open(data_directory.path()).await.unwrap();

    backend
        .account_service
        .register(RegisterCommand {
            company_name: "Acme Ltd".to_string(),
            tax_id: "11222333000181".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap();

    let session = backend
        .account_service
        .authenticate(AuthenticateCommand {
            tax_id: "11222333000181".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(session.account.company_name, "Acme Ltd");
    assert!(session.containers.is_empty());
    assert!(session.schedules.is_empty());

    let added = backend.container_service.add_container(add_c1()).await.unwrap();
    assert_eq!(added.container.entry_date, Local::now().date_naive());
    assert_eq!(backend.container_service.list_container_ids().await.unwrap(), vec!["C1"]);

    let future = Local::now().date_naive().checked_add_days(Days::new(30)).unwrap();
    let created = backend
        .schedule_service
        .create_schedule(CreateScheduleCommand {
            container_id: "C1".to_string(),
            date: format_date(future),
            operation_type: Some(OperationType::Loading),
        })
        .await
        .unwrap();
    assert_eq!(created.schedule.scheduled_date, future);

    // First run stops at the removal prompt, second at the cascade prompt
    let mut confirmer = ReplayConfirmer::new(vec![]);
    let result = backend
        .container_service
        .remove_container(RemoveContainerCommand { selected_id: Some("C1".to_string()) }, &mut confirmer)
        .await
        .unwrap();
    assert_eq!(result, RemoveContainerResult::Declined);
    assert!(matches!(confirmer.take_pending(), Some(ConfirmationPrompt::RemoveContainer { .. })));

    let mut confirmer = ReplayConfirmer::new(vec![true]);
    let result = backend
        .container_service
        .remove_container(RemoveContainerCommand { selected_id: Some("C1".to_string()) }, &mut confirmer)
        .await
        .unwrap();
    assert_eq!(result, RemoveContainerResult::Declined);
    assert_eq!(
        confirmer.take_pending(),
        Some(ConfirmationPrompt::CascadeSchedules {
            container_id: "C1".to_string(),
            schedule_count: 1,
        })
    );
    assert_eq!(backend.schedule_service.list_schedules().await.unwrap().len(), 1);
    assert_eq!(backend.container_service.list_containers().await.unwrap().len(), 1);

    let mut confirmer = ReplayConfirmer::new(vec![true, true]);
    let result = backend
        .container_service
        .remove_container(RemoveContainerCommand { selected_id: Some("C1".to_string()) }, &mut confirmer)
        .await
        .unwrap();
    assert_eq!(
        result,
        RemoveContainerResult::Removed {
            container_id: "C1".to_string(),
            schedules_removed: 1,
            success_message: "Container removed successfully".to_string(),
            refresh: RefreshScope::ALL,
        }
    );
    assert_eq!(confirmer.take_pending(), None);

    assert!(backend.container_service.list_containers().await.unwrap().is_empty());
    assert!(backend.schedule_service.list_schedules().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_data_survives_reopening() {
    let data_directory = TempDir::new().unwrap();

    {
        let backend = Backend::open(data_directory.path()).await.unwrap();
        backend.container_service.add_container(add_c1()).await.unwrap();
    }

    let backend = Backend::open(data_directory.path()).await.unwrap();
    let result = backend.container_service.add_container(add_c1()).await;
    assert!(matches!(result, Err(DomainError::DuplicateKey { .. })));
    assert!(data_directory.path().join("app_config.yaml").exists());
    assert!(data_directory.path().join("container_system.db").exists());
}
