//! Email/password authentication service.
//!
//! `POST /register` stores a bcrypt-hashed user, `POST /login` issues an
//! HS256 JWT valid for one hour by default, and `GET /profile` returns the
//! email of the bearer of a valid token.

use std::sync::Arc;

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;

pub use routes::{build_cors_layer, create_app};

use auth::AuthConfig;
use repository::{InMemoryUserRepository, UserRepository};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub auth_config: Arc<AuthConfig>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserRepository>, auth_config: AuthConfig) -> Self {
        Self {
            users,
            auth_config: Arc::new(auth_config),
        }
    }

    /// State backed by an empty in-memory user store.
    pub fn in_memory(auth_config: AuthConfig) -> Self {
        Self::new(Arc::new(InMemoryUserRepository::new()), auth_config)
    }
}
