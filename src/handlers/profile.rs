use axum::{Extension, Json};

use crate::database::models::User;
use crate::middleware::CurrentUser;

/// GET /api/profile - the caller's profile from the re-resolved record,
/// not from token claims. No password field ever leaves this handler.
pub async fn profile(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<User> {
    Json(user)
}
