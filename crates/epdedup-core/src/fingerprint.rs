//! Fixed-length URL fingerprints.
//!
//! A fingerprint is the first 128 bits of SHA-256 over the normalized URL,
//! hex-encoded lowercase. It is a cheap equality proxy, not a security
//! primitive; distinct normalized URLs may collide.

use sha2::{Digest, Sha256};

use crate::canonical::normalize;

/// Digest bytes kept from SHA-256 (32 hex characters).
pub const FINGERPRINT_BYTES: usize = 16;

/// Fingerprint of `url` after normalization.
pub fn fingerprint(url: &str) -> String {
    fingerprint_normalized(&normalize(url))
}

/// Fingerprint of a string that is already in normalized form.
pub fn fingerprint_normalized(normalized: &str) -> String {
    let digest = Sha256::digest(normalized.as_bytes());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_digest() {
        assert_eq!(fingerprint(""), "e3b0c44298fc1c149afbf4c8996fb924");
    }

    #[test]
    fn fixed_length_lowercase_hex() {
        let fp = fingerprint("https://example.com/api/v1/users?id=7");
        assert_eq!(fp.len(), FINGERPRINT_BYTES * 2);
        assert!(fp
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn equal_for_equal_normal_forms() {
        assert_eq!(
            fingerprint("/api/users?id=1&name=john"),
            fingerprint("/api/users?name=jane&id=2")
        );
        assert_eq!(fingerprint("/api/posts/"), fingerprint("/api/posts"));
        assert_eq!(
            fingerprint("/api/posts"),
            fingerprint_normalized("/api/posts")
        );
    }

    #[test]
    fn differs_for_different_normal_forms() {
        assert_ne!(fingerprint("/api/users?id=1"), fingerprint("/api/users?id=1&name=x"));
        assert_ne!(fingerprint("/api/users"), fingerprint("/api/posts"));
    }

    #[test]
    fn deterministic() {
        let u = "https://example.com/graphql?operationName=GetUser";
        assert_eq!(fingerprint(u), fingerprint(u));
    }
}
