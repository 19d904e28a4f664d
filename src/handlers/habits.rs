use axum::extract::{Path, State};
use axum::{Extension, Json};
use uuid::Uuid;

use crate::database::models::{Habit, HabitPatch, NewHabit};
use crate::database::{habits, Created, DeleteSummary, WriteSummary};
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::server::AppState;
use crate::services::{ensure_owner, EntityKind};

use super::AppJson;

/// POST /api/habits/create
pub async fn create(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    AppJson(body): AppJson<NewHabit>,
) -> Result<Json<Created>, ApiError> {
    let ack = habits::create(&state.db, user.id, body).await?;
    Ok(Json(ack))
}

/// POST /api/habits
pub async fn list(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<Habit>>, ApiError> {
    let records = habits::list(&state.db, user.id).await?;
    Ok(Json(records))
}

/// GET /api/habits/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Habit>, ApiError> {
    habits::get_one(&state.db, id, user.id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("habit not found"))
}

/// PUT /api/habits/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    AppJson(patch): AppJson<HabitPatch>,
) -> Result<Json<WriteSummary>, ApiError> {
    ensure_owner(&state.db, EntityKind::Habit, id, &user).await?;

    let ack = habits::update(&state.db, id, user.id, patch).await?;
    Ok(Json(ack))
}

/// DELETE /api/habits/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteSummary>, ApiError> {
    ensure_owner(&state.db, EntityKind::Habit, id, &user).await?;

    let ack = habits::delete(&state.db, id, user.id).await?;
    Ok(Json(ack))
}
