//! Authentication middleware layer for protecting routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

use super::jwt;
use super::types::{AuthConfig, AuthUser};

/// Middleware function that requires authentication.
///
/// Used with `axum::middleware::from_fn_with_state`. On success the
/// [`AuthUser`] is stored in the request extensions for the handler.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let user = extract_auth_user(request.headers(), &state.auth_config)?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Extract and validate user from request headers.
pub fn extract_auth_user(headers: &HeaderMap, config: &AuthConfig) -> ApiResult<AuthUser> {
    let token = extract_token_from_header(headers)
        .ok_or_else(|| ApiError::unauthorized("Missing token"))?;

    let claims = jwt::validate_token(config, token)?;
    Ok(claims.into())
}

fn extract_token_from_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
