use axum::extract::{FromRequest, Request};

use crate::error::ApiError;

pub mod auth;
pub mod habits;
pub mod identities;
pub mod logs;
pub mod profile;

/// JSON extractor that normalizes every undecodable request body to a 400
/// with the standard `{"error": ...}` shape.
pub struct AppJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(ApiError::bad_request(rejection.body_text())),
        }
    }
}
