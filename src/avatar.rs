//! Gravatar URL derivation. The avatar is computed once at registration from
//! the email digest and stored on the user record.

use sha2::{Digest, Sha256};

/// Build a gravatar URL for an email address (200px, PG-rated, identicon-free
/// default), per the SHA-256 address convention.
pub fn gravatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let digest = Sha256::digest(normalized.as_bytes());

    let mut hex = String::with_capacity(64);
    for byte in digest {
        hex.push_str(&format!("{:02x}", byte));
    }

    format!("https://www.gravatar.com/avatar/{}?s=200&d=mm&r=pg", hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravatar_url_is_deterministic_and_normalized() {
        let a = gravatar_url("A@X.com ");
        let b = gravatar_url("a@x.com");
        assert_eq!(a, b);
        assert!(a.starts_with("https://www.gravatar.com/avatar/"));
        assert!(a.ends_with("?s=200&d=mm&r=pg"));
    }

    #[test]
    fn test_different_emails_differ() {
        assert_ne!(gravatar_url("a@x.com"), gravatar_url("b@x.com"));
    }
}
