//! User repository abstraction and its in-memory implementation.
//!
//! Handlers only see the [`UserRepository`] trait through `AppState`, so a
//! durable backend can be swapped in without touching the HTTP layer.

use std::collections::HashMap;

use parking_lot::RwLock;
use thiserror::Error;

use crate::models::User;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("a user with email {0} already exists")]
    DuplicateEmail(String),
}

/// Storage operations the auth handlers need.
///
/// Emails are compared exactly as received (case-sensitive).
pub trait UserRepository: Send + Sync {
    /// Append a user. Fails without modifying the store if the email is taken.
    fn insert(&self, user: User) -> Result<(), RepositoryError>;

    /// Look up a user by email.
    fn find_by_email(&self, email: &str) -> Option<User>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local store. Writers take the lock exclusively, lookups share it.
#[derive(Default)]
pub struct InMemoryUserRepository {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    // email -> position in `users`
    by_email: HashMap<String, usize>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn insert(&self, user: User) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write();
        if inner.by_email.contains_key(&user.email) {
            return Err(RepositoryError::DuplicateEmail(user.email));
        }
        let index = inner.users.len();
        inner.by_email.insert(user.email.clone(), index);
        inner.users.push(user);
        Ok(())
    }

    fn find_by_email(&self, email: &str) -> Option<User> {
        let inner = self.inner.read();
        inner
            .by_email
            .get(email)
            .and_then(|&index| inner.users.get(index))
            .cloned()
    }

    fn len(&self) -> usize {
        self.inner.read().users.len()
    }
}
