use log::{info, warn};
use shared::{Account, RefreshScope};
use std::sync::Arc;

use super::commands::account::{AuthenticateCommand, AuthenticateResult, RegisterCommand, RegisterResult};
use super::errors::{DomainError, DomainResult};
use super::validation::{digits_only, require_all_non_empty, validate_tax_id};
use crate::storage::{AccountStorage, Connection, ContainerStorage, ScheduleStorage};

/// Service for registering the company account and logging in
pub struct AccountService<C: Connection> {
    accounts: C::AccountRepository,
    containers: C::ContainerRepository,
    schedules: C::ScheduleRepository,
}

impl<C: Connection> AccountService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            accounts: connection.create_account_repository(),
            containers: connection.create_container_repository(),
            schedules: connection.create_schedule_repository(),
        }
    }

    /// Register a new account
    pub async fn register(&self, command: RegisterCommand) -> DomainResult<RegisterResult> {
        let company_name = command.company_name.trim();
        let password = command.password.trim();

        require_all_non_empty(&[
            ("Company name", company_name),
            ("Tax ID", command.tax_id.as_str()),
            ("Password", password),
        ])?;

        let tax_id = validate_tax_id(&command.tax_id)?;
        info!("Registering account for {}", tax_id);

        if self.accounts.find_account(&tax_id).await?.is_some() {
            warn!("Tax ID {} already registered", tax_id);
            return Err(DomainError::DuplicateKey {
                entity: "Tax ID",
                key: tax_id,
            });
        }

        let account = Account {
            company_name: company_name.to_string(),
            tax_id,
            password: password.to_string(),
        };

        if !self.accounts.insert_account(&account).await? {
            return Err(DomainError::DuplicateKey {
                entity: "Tax ID",
                key: account.tax_id,
            });
        }

        info!("Registered account {} ({})", account.company_name, account.tax_id);

        Ok(RegisterResult {
            account: account.profile(),
            success_message: "Account registered successfully".to_string(),
        })
    }

    /// Log in and load the lists of the authenticated view
    pub async fn authenticate(&self, command: AuthenticateCommand) -> DomainResult<AuthenticateResult> {
        let password = command.password.trim();
        require_all_non_empty(&[("Tax ID", command.tax_id.as_str()), ("Password", password)])?;

        let tax_id = digits_only(&command.tax_id);
        let account = match self.accounts.find_account_by_credentials(&tax_id, password).await? {
            Some(account) => account,
            None => {
                warn!("Rejected login for {}", tax_id);
                return Err(DomainError::InvalidCredentials);
            }
        };

        let containers = self.containers.list_containers().await?;
        let schedules = self.schedules.list_schedules().await?;

        info!(
            "Authenticated {} with {} containers and {} schedules",
            account.tax_id,
            containers.len(),
            schedules.len()
        );

        Ok(AuthenticateResult {
            account: account.profile(),
            containers,
            schedules,
            refresh: RefreshScope::ALL,
        })
    }
}
