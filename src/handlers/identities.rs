use axum::extract::{Path, State};
use axum::{Extension, Json};
use uuid::Uuid;

use crate::database::models::{Identity, IdentityPatch, NewIdentity};
use crate::database::{identities, Created, DeleteSummary, WriteSummary};
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::server::AppState;
use crate::services::{ensure_owner, EntityKind};

use super::AppJson;

/// POST /api/identities/create
pub async fn create(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    AppJson(body): AppJson<NewIdentity>,
) -> Result<Json<Created>, ApiError> {
    let ack = identities::create(&state.db, user.id, body).await?;
    Ok(Json(ack))
}

/// POST /api/identities
pub async fn list(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<Identity>>, ApiError> {
    let records = identities::list(&state.db, user.id).await?;
    Ok(Json(records))
}

/// GET /api/identities/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Identity>, ApiError> {
    identities::get_one(&state.db, id, user.id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("identity not found"))
}

/// PUT /api/identities/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    AppJson(patch): AppJson<IdentityPatch>,
) -> Result<Json<WriteSummary>, ApiError> {
    ensure_owner(&state.db, EntityKind::Identity, id, &user).await?;

    let ack = identities::update(&state.db, id, user.id, patch).await?;
    Ok(Json(ack))
}

/// DELETE /api/identities/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteSummary>, ApiError> {
    ensure_owner(&state.db, EntityKind::Identity, id, &user).await?;

    let ack = identities::delete(&state.db, id, user.id).await?;
    Ok(Json(ack))
}
