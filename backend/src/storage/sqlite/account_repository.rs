use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use sqlx::sqlite::SqliteRow;
use sqlx::{Connection as _, Row};
use shared::Account;

use super::connection::{is_unique_violation, DbConnection};
use crate::storage::traits::AccountStorage;

/// Repository for account operations
#[derive(Clone)]
pub struct AccountRepository {
    db: DbConnection,
}

impl AccountRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_account(row: &SqliteRow) -> Result<Account> {
        Ok(Account {
            company_name: row.try_get("companyName")?,
            tax_id: row.try_get("taxId")?,
            password: row.try_get("password")?,
        })
    }
}

#[async_trait]
impl AccountStorage for AccountRepository {
    async fn find_account(&self, tax_id: &str) -> Result<Option<Account>> {
        let mut conn = self.db.acquire().await?;
        let row = sqlx::query(
            r#"
            SELECT companyName, taxId, password
            FROM Account
            WHERE taxId = ?
            "#,
        )
        .bind(tax_id)
        .fetch_optional(&mut conn)
        .await?;
        conn.close().await?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn find_account_by_credentials(&self, tax_id: &str, password: &str) -> Result<Option<Account>> {
        let mut conn = self.db.acquire().await?;
        let row = sqlx::query(
            r#"
            SELECT companyName, taxId, password
            FROM Account
            WHERE taxId = ? AND password = ?
            "#,
        )
        .bind(tax_id)
        .bind(password)
        .fetch_optional(&mut conn)
        .await?;
        conn.close().await?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn insert_account(&self, account: &Account) -> Result<bool> {
        let mut conn = self.db.acquire().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO Account (companyName, taxId, password)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&account.company_name)
        .bind(&account.tax_id)
        .bind(&account.password)
        .execute(&mut conn)
        .await;

        let inserted = match result {
            Ok(_) => true,
            Err(e) if is_unique_violation(&e) => {
                debug!("Account {} already present", account.tax_id);
                false
            }
            Err(e) => return Err(e.into()),
        };
        conn.close().await?;
        Ok(inserted)
    }
}
