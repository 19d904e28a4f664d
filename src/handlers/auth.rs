//! Public auth handlers: registration and token issue.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::auth::{self, credentials, AuthError, Claims};
use crate::database::models::User;
use crate::error::ApiError;
use crate::server::AppState;

use super::AppJson;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response: the user profile with the signed token attached. The
/// password hash is skipped by the profile's serializer.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: User,
    pub token: String,
}

/// POST /register - create an account
pub async fn register(
    State(state): State<AppState>,
    AppJson(body): AppJson<RegisterRequest>,
) -> Result<Json<Value>, ApiError> {
    if body.username.is_empty() || body.password.is_empty() {
        return Err(ApiError::bad_request("username and password are required"));
    }

    if credentials::find_by_username(&state.db, &body.username).await?.is_some() {
        return Err(ApiError::conflict("username already exists"));
    }

    let hash = credentials::hash_password(&body.password).map_err(|e| {
        tracing::error!("password hashing failed: {}", e);
        ApiError::internal_server_error("error while hashing password, try again")
    })?;

    credentials::insert_user(&state.db, &body.username, &body.firstname, &body.lastname, &hash).await?;

    tracing::info!("registered user '{}'", body.username);
    Ok(Json(json!({ "result": "registration successful" })))
}

/// POST /login - verify credentials and issue a signed token
pub async fn login(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = credentials::find_by_username(&state.db, &body.username)
        .await?
        .ok_or(AuthError::InvalidUsername)?;

    let matches = credentials::verify_password(&body.password, &user.password).map_err(|e| {
        tracing::error!("password verification failed: {}", e);
        ApiError::internal_server_error("error while verifying password, try again")
    })?;

    if !matches {
        return Err(AuthError::InvalidPassword.into());
    }

    let token = auth::generate_jwt(&Claims::new(&user))?;

    Ok(Json(LoginResponse { user, token }))
}
