//! Password hashing and verification with bcrypt.
//!
//! Hashes are self-describing (`$2b$<cost>$<salt><digest>`), so the cost used
//! at registration travels with the stored hash and can be raised later
//! without invalidating existing users.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
}

/// Hash a password with a fresh random salt.
///
/// Passwords that would overflow bcrypt's 72-byte input limit are rejected
/// instead of being silently truncated.
pub fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    Ok(bcrypt::non_truncating_hash(password, cost)?)
}

/// Check a password against a stored hash.
///
/// A mismatch and an unreadable hash both return `false`.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::non_truncating_verify(password, hash) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::warn!("Password verification error: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // bcrypt's minimum cost keeps the tests fast
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("pw1", TEST_COST).expect("should hash");
        assert_ne!(hash, "pw1");
        assert!(verify_password("pw1", &hash));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let hash = hash_password("pw1", TEST_COST).expect("should hash");
        assert!(!verify_password("pw2", &hash));
        assert!(!verify_password("PW1", &hash));
        assert!(!verify_password("", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same", TEST_COST).unwrap();
        let second = hash_password("same", TEST_COST).unwrap();
        assert_ne!(first, second);
        assert!(verify_password("same", &first));
        assert!(verify_password("same", &second));
    }

    #[test]
    fn test_cost_is_encoded_in_hash() {
        let hash = hash_password("pw1", 5).unwrap();
        assert!(hash.starts_with("$2b$05$"), "unexpected hash prefix: {}", hash);
    }

    #[test]
    fn test_corrupt_hash_fails_verification() {
        assert!(!verify_password("pw1", "not-a-bcrypt-hash"));
        assert!(!verify_password("pw1", ""));

        let mut hash = hash_password("pw1", TEST_COST).unwrap();
        hash.truncate(20);
        assert!(!verify_password("pw1", &hash));
    }

    #[test]
    fn test_overlong_password_is_an_error() {
        let long = "a".repeat(73);
        assert!(hash_password(&long, TEST_COST).is_err());

        let medium = "a".repeat(60);
        let hash = hash_password(&medium, TEST_COST).expect("60 bytes is allowed");
        assert!(verify_password(&medium, &hash));
    }

    #[test]
    fn test_invalid_cost_is_an_error() {
        assert!(hash_password("pw1", 2).is_err());
        assert!(hash_password("pw1", 40).is_err());
    }
}
