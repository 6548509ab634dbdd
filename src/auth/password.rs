//! Credential codec: salted one-way password hashing. There is deliberately
//! no reversal operation.

use bcrypt::{hash, verify, BcryptError};

use crate::config;

/// Hash a plaintext password with a per-call random salt.
pub fn hash_password(plaintext: &str) -> Result<String, BcryptError> {
    hash(plaintext, config::config().security.bcrypt_cost)
}

/// Check a plaintext password against a stored digest.
pub fn verify_password(plaintext: &str, digest: &str) -> Result<bool, BcryptError> {
    verify(plaintext, digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verify_roundtrip() {
        let digest = hash_password("secret1").unwrap();
        assert!(verify_password("secret1", &digest).unwrap());
        assert!(!verify_password("secret2", &digest).unwrap());
    }

    #[test]
    fn test_same_password_hashes_differ() {
        // Random salt per call
        let a = hash_password("secret1").unwrap();
        let b = hash_password("secret1").unwrap();
        assert_ne!(a, b);
    }
}
