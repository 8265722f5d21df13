//! Authentication service.
//!
//! Registration, login and email checks, all scoped to a tenant. Every
//! successful registration or login produces a signed session token.

mod error;
pub mod token;

pub use error::AuthError;
pub use token::{Claims, TokenSigner, extract_bearer_token};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::SqlitePool;

use shoplane_core::{Email, TenantId};

use crate::db::RepositoryError;
use crate::db::accounts::AccountRepository;
use crate::db::tenants::TenantRepository;
use crate::models::account::Account;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// New account details as supplied by the registration endpoint.
pub struct Registration<'r> {
    pub email: &'r str,
    pub password: &'r str,
    pub first_name: &'r str,
    pub last_name: &'r str,
    pub phone: Option<&'r str>,
}

/// Authentication service.
pub struct AuthService<'a> {
    accounts: AccountRepository<'a>,
    tenants: TenantRepository<'a>,
    tokens: &'a TokenSigner,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool, tokens: &'a TokenSigner) -> Self {
        Self {
            accounts: AccountRepository::new(pool),
            tenants: TenantRepository::new(pool),
            tokens,
        }
    }

    /// Register a new account under a tenant and issue a session token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UnknownTenant` if the tenant does not exist.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::DuplicateAccount` if the email is already registered.
    pub async fn register(
        &self,
        tenant_id: &TenantId,
        registration: Registration<'_>,
    ) -> Result<(Account, String), AuthError> {
        if !self.tenants.exists(tenant_id).await? {
            return Err(AuthError::UnknownTenant);
        }

        let email = Email::parse(registration.email)?;
        validate_password(registration.password)?;
        let password_hash = hash_password(registration.password)?;

        let account = self
            .accounts
            .create(
                tenant_id,
                &email,
                &password_hash,
                registration.first_name,
                registration.last_name,
                registration.phone,
            )
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::DuplicateAccount,
                other => AuthError::Repository(other),
            })?;

        let token = self.tokens.issue(account.id, &account.email, tenant_id)?;
        Ok((account, token))
    }

    /// Login with email and password, issuing a session token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is
    /// wrong. Unknown email and wrong password are indistinguishable.
    pub async fn login(
        &self,
        tenant_id: &TenantId,
        email: &str,
        password: &str,
    ) -> Result<(Account, String), AuthError> {
        let email = Email::parse(email)?;

        let (account, password_hash) = self
            .accounts
            .get_with_credentials(tenant_id, &email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        let token = self.tokens.issue(account.id, &account.email, tenant_id)?;
        Ok((account, token))
    }

    /// Check whether an email is already registered under a tenant.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid,
    /// `AuthError::Repository` on database failure.
    pub async fn email_exists(
        &self,
        tenant_id: &TenantId,
        email: &str,
    ) -> Result<bool, AuthError> {
        let email = Email::parse(email)?;
        Ok(self.accounts.exists(tenant_id, &email).await?)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
