use anyhow::{Context, Result};

use crate::auth::AuthConfig;

/// Default listen port
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Empty means permissive CORS.
    pub cors_allowed_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .context("PORT must be a valid number")?,
            None => DEFAULT_PORT,
        };

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            port,
            cors_allowed_origins,
            auth: AuthConfig::from_lookup(&lookup)?,
        })
    }
}
