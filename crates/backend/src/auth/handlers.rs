//! Authentication HTTP handlers.

use axum::{body::Bytes, extract::State, http::StatusCode, Extension, Json};
use shared_types::{Credentials, ProfileResponse, RegisterResponse, TokenResponse};

use crate::error::{ApiError, ApiResult};
use crate::models::User;
use crate::repository::RepositoryError;
use crate::AppState;

use super::{jwt, password, types::AuthUser};

/// Decode a JSON credentials body regardless of the request's Content-Type.
fn parse_credentials(body: &[u8]) -> ApiResult<Credentials> {
    Ok(serde_json::from_slice(body)?)
}

/// Register a new user.
///
/// The password is hashed on the blocking pool before the user is stored.
/// An email that is already registered is rejected with 409.
pub async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let Credentials {
        email,
        password: plaintext,
    } = parse_credentials(&body)?;

    if email.is_empty() || plaintext.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    // Skip the expensive hash when the email is obviously taken.
    if state.users.find_by_email(&email).is_some() {
        tracing::warn!("Registration for existing email: {}", email);
        return Err(RepositoryError::DuplicateEmail(email).into());
    }

    let cost = state.auth_config.bcrypt_cost;
    let password_hash =
        tokio::task::spawn_blocking(move || password::hash_password(&plaintext, cost))
            .await
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Hashing task failed: {}", e)))??;

    state.users.insert(User::new(email.clone(), password_hash))?;

    tracing::info!("Registered user: {} ({} total)", email, state.users.len());

    Ok((StatusCode::CREATED, Json(RegisterResponse::registered())))
}

/// Check credentials and issue a session token.
///
/// Unknown email and wrong password both return 401 with the same message.
pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<TokenResponse>> {
    let Credentials {
        email,
        password: plaintext,
    } = parse_credentials(&body)?;

    let Some(user) = state.users.find_by_email(&email) else {
        tracing::warn!("Login for unknown user: {}", email);
        return Err(ApiError::unauthorized("Invalid email or password"));
    };

    let hash = user.password_hash;
    let valid = tokio::task::spawn_blocking(move || password::verify_password(&plaintext, &hash))
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Verification task failed: {}", e)))?;

    if !valid {
        tracing::warn!("Invalid password for user: {}", email);
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let token = jwt::create_token(&state.auth_config, &user.email)?;

    tracing::info!("Successful login for: {}", user.email);

    Ok(Json(TokenResponse { token }))
}

/// Return the profile of the authenticated caller.
pub async fn profile(Extension(user): Extension<AuthUser>) -> Json<ProfileResponse> {
    Json(ProfileResponse { email: user.email })
}
