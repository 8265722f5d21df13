//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] shoplane_core::EmailError),

    /// Invalid credentials (wrong password or account not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Email already registered under this tenant.
    #[error("account already exists")]
    DuplicateAccount,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Tenant ID does not match any provisioned storefront.
    #[error("unknown store")]
    UnknownTenant,

    /// Authorization header absent or not a bearer token.
    #[error("missing bearer token")]
    MissingToken,

    /// Token failed signature or expiry validation.
    #[error("invalid or expired token")]
    InvalidToken,

    /// Token could not be signed.
    #[error("token signing error")]
    TokenSigning,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
