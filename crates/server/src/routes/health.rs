//! Health check handlers.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::error::Result;
use crate::response::Envelope;
use crate::state::AppState;

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// Liveness probe. Always succeeds while the process is running.
pub async fn liveness() -> Json<Envelope<Health>> {
    Json(Envelope::success(Health { status: "ok" }))
}

/// Readiness probe. Fails if the database is unreachable.
///
/// # Errors
///
/// Returns `AppError::Database` if the probe query fails.
pub async fn readiness(State(state): State<AppState>) -> Result<Json<Envelope<Health>>> {
    sqlx::query("SELECT 1")
        .execute(state.pool())
        .await
        .map_err(crate::db::RepositoryError::Database)?;

    Ok(Json(Envelope::success(Health { status: "ready" })))
}
