//! Authentication extractor.
//!
//! Protected handlers take [`CurrentUser`] as an argument; extraction
//! verifies the bearer token against the shared signer and rejects the
//! request with 401 before the handler body runs.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use shoplane_core::{Email, TenantId, UserId};

use crate::error::AppError;
use crate::services::auth::{AuthError, extract_bearer_token};
use crate::state::AppState;

/// The authenticated account, as proven by a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(user: CurrentUser) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Account ID from the token subject.
    pub user_id: UserId,
    /// Email carried in the token.
    pub email: Email,
    /// Tenant the token is scoped to.
    pub tenant_id: TenantId,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Auth(AuthError::MissingToken))?;

        let token =
            extract_bearer_token(header_value).ok_or(AppError::Auth(AuthError::MissingToken))?;

        let claims = state.tokens().verify(token).map_err(AppError::Auth)?;

        let user_id = claims.user_id().map_err(AppError::Auth)?;
        let email = claims
            .email
            .parse::<Email>()
            .map_err(|_| AppError::Auth(AuthError::InvalidToken))?;

        Ok(Self {
            user_id,
            email,
            tenant_id: TenantId::new(claims.tenant_id),
        })
    }
}
