//! Registration, login and profile handlers.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shoplane_core::TenantId;

use crate::db::accounts::AccountRepository;
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::response::Envelope;
use crate::services::auth::{AuthService, Registration};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub admin_object_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub admin_object_id: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRequest {
    pub admin_object_id: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub exists: bool,
}

/// `POST /api/users/register`
///
/// # Errors
///
/// Returns `AppError::Auth` for validation failures, unknown tenants and
/// duplicate accounts.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<Envelope<TokenResponse>>> {
    let tenant_id = TenantId::new(request.admin_object_id);
    let auth = AuthService::new(state.pool(), state.tokens());

    let (_, token) = auth
        .register(
            &tenant_id,
            Registration {
                email: &request.email,
                password: &request.password,
                first_name: &request.first_name,
                last_name: &request.last_name,
                phone: request.phone.as_deref(),
            },
        )
        .await?;

    Ok(Json(Envelope::success(TokenResponse { token })))
}

/// `POST /api/users/login`
///
/// # Errors
///
/// Returns `AppError::Auth` with 401 for bad credentials.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Envelope<TokenResponse>>> {
    let tenant_id = TenantId::new(request.admin_object_id);
    let auth = AuthService::new(state.pool(), state.tokens());

    let (_, token) = auth
        .login(&tenant_id, &request.email, &request.password)
        .await?;

    Ok(Json(Envelope::success(TokenResponse { token })))
}

/// `POST /api/users/check`
///
/// Tells a client whether an email is already registered so it can steer
/// between the sign-in and sign-up screens.
///
/// # Errors
///
/// Returns `AppError::Auth` for a malformed email.
pub async fn check(
    State(state): State<AppState>,
    Json(request): Json<CheckRequest>,
) -> Result<Json<Envelope<CheckResponse>>> {
    let tenant_id = TenantId::new(request.admin_object_id);
    let auth = AuthService::new(state.pool(), state.tokens());

    let exists = auth.email_exists(&tenant_id, &request.email).await?;
    Ok(Json(Envelope::success(CheckResponse { exists })))
}

/// Profile fields for the authenticated account.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// `GET /api/users/profile`
///
/// # Errors
///
/// Returns 401 without a valid token, `AppError::NotFound` if the
/// account behind the token no longer exists.
pub async fn profile(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Envelope<Profile>>> {
    let account = AccountRepository::new(state.pool())
        .get_by_id(user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".to_owned()))?;

    Ok(Json(Envelope::success(Profile {
        user_id: account.id.to_string(),
        email: account.email.into_inner(),
        first_name: account.first_name,
        last_name: account.last_name,
        phone: account.phone,
        created_at: account.created_at,
    })))
}
