//! JWT token creation and validation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;

use super::types::{AuthConfig, Claims};

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("token expired")]
    Expired,

    #[error("token lifetime of {0} seconds is out of range")]
    InvalidLifetime(i64),
}

/// Create a new JWT token for a user.
pub fn create_token(config: &AuthConfig, email: &str) -> Result<String, TokenError> {
    create_token_at(config, email, Utc::now())
}

/// Create a token as if issued at `now`.
pub fn create_token_at(
    config: &AuthConfig,
    email: &str,
    now: DateTime<Utc>,
) -> Result<String, TokenError> {
    let exp = Duration::try_seconds(config.token_ttl_seconds)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or(TokenError::InvalidLifetime(config.token_ttl_seconds))?;

    let claims = Claims {
        email: email.to_string(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(TokenError::Signing)
}

/// Validate a JWT token and return claims.
pub fn validate_token(config: &AuthConfig, token: &str) -> Result<Claims, TokenError> {
    validate_token_at(config, token, Utc::now())
}

/// Validate a token against the clock reading `now`.
///
/// The signature is checked against the current secret and then each previous
/// secret. A token is expired once `now` reaches `exp`; there is no leeway.
pub fn validate_token_at(
    config: &AuthConfig,
    token: &str,
    now: DateTime<Utc>,
) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is checked below against `now` instead of the system clock.
    validation.validate_exp = false;

    let mut last_error = None;
    for secret in config.verification_secrets() {
        match decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        ) {
            Ok(token_data) => {
                let claims = token_data.claims;
                if claims.exp <= now.timestamp() {
                    return Err(TokenError::Expired);
                }
                return Ok(claims);
            }
            Err(e) if matches!(e.kind(), ErrorKind::InvalidSignature) => last_error = Some(e),
            Err(e) => return Err(TokenError::Invalid(e)),
        }
    }

    Err(TokenError::Invalid(
        last_error.unwrap_or_else(|| ErrorKind::InvalidSignature.into()),
    ))
}
