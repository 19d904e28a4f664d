//! Log handlers. Reads are owner-qualified queries; writes go through the
//! ownership guard first.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use uuid::Uuid;

use crate::database::models::{LogPatch, LogWithHabits, NewLog};
use crate::database::{logs, Created, DeleteSummary, WriteSummary};
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::server::AppState;
use crate::services::{ensure_owner, EntityKind};

use super::AppJson;

/// POST /api/logs/create - create a log owned by the caller
pub async fn create(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    AppJson(body): AppJson<NewLog>,
) -> Result<Json<Created>, ApiError> {
    let ack = logs::create(&state.db, user.id, body).await?;
    Ok(Json(ack))
}

/// POST /api/logs - list the caller's logs, joined with habit records
pub async fn list(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<LogWithHabits>>, ApiError> {
    let records = logs::list(&state.db, user.id).await?;
    Ok(Json(records))
}

/// GET /api/logs/:id - fetch one log, joined with habit records
pub async fn get(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<LogWithHabits>, ApiError> {
    logs::get_one(&state.db, id, user.id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("log entry not found"))
}

/// PUT /api/logs/:id - replace the mutable fields if the caller owns it
pub async fn update(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    AppJson(patch): AppJson<LogPatch>,
) -> Result<Json<WriteSummary>, ApiError> {
    ensure_owner(&state.db, EntityKind::Log, id, &user).await?;

    let ack = logs::update(&state.db, id, user.id, patch).await?;
    Ok(Json(ack))
}

/// DELETE /api/logs/:id - remove one log if the caller owns it
pub async fn delete(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteSummary>, ApiError> {
    ensure_owner(&state.db, EntityKind::Log, id, &user).await?;

    let ack = logs::delete(&state.db, id, user.id).await?;
    Ok(Json(ack))
}
