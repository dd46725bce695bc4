//! Authentication module for email/password login with JWT sessions.
//!
//! This module provides:
//! - bcrypt password hashing and verification
//! - JWT token creation and validation, with previous-secret rotation
//! - `register`, `login` and `profile` handlers
//! - `require_auth` middleware for protecting routes

mod handlers;
pub mod jwt;
mod middleware;
pub mod password;
pub mod types;

pub use handlers::{login, profile, register};
pub use jwt::TokenError;
pub use middleware::{extract_auth_user, require_auth};
pub use password::PasswordError;
pub use types::{AuthConfig, AuthUser, Claims};
