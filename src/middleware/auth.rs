use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{self, AuthError, Claims};
use crate::error::ApiError;

/// Verified claims context extracted from the bearer token. This is the
/// untrusted pointer to identity; the canonical record is resolved by the
/// current-user middleware before any authorization decision.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
    pub firstname: String,
    pub lastname: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.sub,
            firstname: claims.firstname,
            lastname: claims.lastname,
        }
    }
}

/// Bearer-token authentication middleware: validates the token signature
/// and expiry, then injects the decoded claims into the request.
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(&headers)?;
    let claims = auth::decode_jwt(&token)?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
fn extract_bearer(headers: &HeaderMap) -> Result<String, AuthError> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| AuthError::MalformedHeader("missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::MalformedHeader("invalid Authorization header encoding".to_string()))?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| {
            AuthError::MalformedHeader("Authorization header must use Bearer token format".to_string())
        })?;

    if token.trim().is_empty() {
        return Err(AuthError::MalformedHeader("empty bearer token".to_string()));
    }

    Ok(token.to_string())
}
