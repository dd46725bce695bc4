/// A registered user as held by the user repository.
///
/// `password_hash` is the bcrypt string produced at registration; the
/// plaintext password never leaves the register handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
    pub password_hash: String,
}

impl User {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }
}
