use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::credentials;
use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::server::AppState;

/// The storage-backed user record for the authenticated caller. Handlers
/// authorize against this, never against claim values frozen at issue time.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Re-fetches the canonical user record named by the verified username
/// claim and injects it into the request. A record that has vanished since
/// the token was issued is a storage-level fault for this request, not a
/// business error.
pub async fn current_user_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("authentication required"))?;

    let user = credentials::find_by_username(&state.db, &auth_user.username)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| {
            tracing::error!(
                "authenticated user '{}' has no record in storage",
                auth_user.username
            );
            ApiError::internal_server_error("failed to resolve user record")
        })?;

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}
