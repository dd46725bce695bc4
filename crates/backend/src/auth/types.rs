//! Auth-related types and configuration.

use std::ops::RangeInclusive;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Used when `JWT_SECRET` is not set. Only suitable for local development.
const DEV_JWT_SECRET: &str = "development-secret-change-in-production";

/// Default token lifetime: one hour.
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 3600;

/// Longest accepted token lifetime: thirty days.
pub const MAX_TOKEN_TTL_SECONDS: i64 = 30 * 24 * 3600;

/// Work factors bcrypt accepts.
pub const BCRYPT_COST_RANGE: RangeInclusive<u32> = 4..=31;

/// JWT Claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Email the token was issued to
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Validated user from JWT
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.email,
        }
    }
}

/// Auth configuration loaded from environment
#[derive(Clone)]
pub struct AuthConfig {
    /// Secret used to sign new tokens (and verify them).
    pub jwt_secret: String,
    /// Retired secrets still accepted when verifying.
    pub previous_secrets: Vec<String>,
    pub token_ttl_seconds: i64,
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Config with the given signing secret and default lifetime and cost.
    pub fn with_secret(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            previous_secrets: Vec::new(),
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Load auth configuration from environment variables.
    ///
    /// Recognized env vars:
    /// - `JWT_SECRET`: Secret key for signing JWTs
    /// - `JWT_PREVIOUS_SECRETS`: Comma-separated retired secrets, verification only
    /// - `TOKEN_TTL_SECONDS`: Token lifetime (default 3600, at most thirty days)
    /// - `BCRYPT_COST`: Password hashing work factor (default 12, 4 to 31)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None => {
                tracing::warn!("JWT_SECRET not set, using development secret");
                DEV_JWT_SECRET.to_string()
            }
        };

        let previous_secrets: Vec<String> = lookup("JWT_PREVIOUS_SECRETS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let token_ttl_seconds = match lookup("TOKEN_TTL_SECONDS") {
            Some(raw) => raw
                .parse::<i64>()
                .context("TOKEN_TTL_SECONDS must be a valid number")?,
            None => DEFAULT_TOKEN_TTL_SECONDS,
        };
        if !(1..=MAX_TOKEN_TTL_SECONDS).contains(&token_ttl_seconds) {
            anyhow::bail!(
                "TOKEN_TTL_SECONDS must be between 1 and {}",
                MAX_TOKEN_TTL_SECONDS
            );
        }

        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(raw) => raw
                .parse::<u32>()
                .context("BCRYPT_COST must be a valid number")?,
            None => bcrypt::DEFAULT_COST,
        };
        if !BCRYPT_COST_RANGE.contains(&bcrypt_cost) {
            anyhow::bail!(
                "BCRYPT_COST must be between {} and {}",
                BCRYPT_COST_RANGE.start(),
                BCRYPT_COST_RANGE.end()
            );
        }

        Ok(Self {
            jwt_secret,
            previous_secrets,
            token_ttl_seconds,
            bcrypt_cost,
        })
    }

    /// Secrets tried when verifying a token, current one first.
    pub fn verification_secrets(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.jwt_secret.as_str())
            .chain(self.previous_secrets.iter().map(String::as_str))
    }
}
