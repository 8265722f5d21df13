//! Account repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use shoplane_core::{Email, TenantId, UserId};

use super::RepositoryError;
use crate::models::account::Account;

/// Raw account row from the database.
#[derive(sqlx::FromRow)]
struct AccountRow {
    id: String,
    tenant_id: String,
    email: String,
    first_name: String,
    last_name: String,
    phone: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_domain(self) -> Result<Account, RepositoryError> {
        let id = UserId::parse(&self.id).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid account id: {e}"))
        })?;
        let email = self.email.parse::<Email>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in account: {e}"))
        })?;

        Ok(Account {
            id,
            tenant_id: TenantId::new(self.tenant_id),
            email,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row variant carrying the password hash, used only by login.
#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: String,
    tenant_id: String,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    phone: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CredentialRow {
    fn into_parts(self) -> Result<(Account, String), RepositoryError> {
        let hash = self.password_hash.clone();
        let account = AccountRow {
            id: self.id,
            tenant_id: self.tenant_id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_domain()?;
        Ok((account, hash))
    }
}

/// Repository for account database operations.
pub struct AccountRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AccountRepository<'a> {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new account under a tenant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already
    /// registered under the tenant, `RepositoryError::Database` on other
    /// failures.
    pub async fn create(
        &self,
        tenant_id: &TenantId,
        email: &Email,
        password_hash: &str,
        first_name: &str,
        last_name: &str,
        phone: Option<&str>,
    ) -> Result<Account, RepositoryError> {
        let id = UserId::generate();
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO account (id, tenant_id, email, password_hash,
                                 first_name, last_name, phone,
                                 created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ",
        )
        .bind(id.as_uuid().to_string())
        .bind(tenant_id.as_str())
        .bind(email.as_str())
        .bind(password_hash)
        .bind(first_name)
        .bind(last_name)
        .bind(phone)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                RepositoryError::Conflict(format!(
                    "email {email} already registered under tenant"
                ))
            }
            other => RepositoryError::Database(other),
        })?;

        Ok(Account {
            id,
            tenant_id: tenant_id.clone(),
            email: email.clone(),
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            phone: phone.map(str::to_owned),
            created_at: now,
            updated_at: now,
        })
    }

    /// Look up an account with its password hash for credential checks.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails,
    /// `RepositoryError::DataCorruption` if stored fields fail to parse.
    pub async fn get_with_credentials(
        &self,
        tenant_id: &TenantId,
        email: &Email,
    ) -> Result<Option<(Account, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r"
            SELECT id, tenant_id, email, password_hash,
                   first_name, last_name, phone, created_at, updated_at
            FROM account
            WHERE tenant_id = ?1 AND email = ?2
            ",
        )
        .bind(tenant_id.as_str())
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(CredentialRow::into_parts).transpose()
    }

    /// Get an account by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails,
    /// `RepositoryError::DataCorruption` if stored fields fail to parse.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r"
            SELECT id, tenant_id, email, first_name, last_name, phone,
                   created_at, updated_at
            FROM account
            WHERE id = ?1
            ",
        )
        .bind(id.as_uuid().to_string())
        .fetch_optional(self.pool)
        .await?;

        row.map(AccountRow::into_domain).transpose()
    }

    /// Check whether an email is registered under a tenant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(
        &self,
        tenant_id: &TenantId,
        email: &Email,
    ) -> Result<bool, RepositoryError> {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM account WHERE tenant_id = ?1 AND email = ?2")
                .bind(tenant_id.as_str())
                .bind(email.as_str())
                .fetch_optional(self.pool)
                .await?;

        Ok(row.is_some())
    }
}
