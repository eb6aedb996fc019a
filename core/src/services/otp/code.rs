//! Code generation and digesting

use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use sha2::{Digest, Sha256};

/// Generate a uniformly random 6-digit code in `100000..=999999`
///
/// Uses OsRng so codes are unpredictable across processes.
pub fn generate_code() -> String {
    let code: u32 = OsRng.gen_range(100_000..1_000_000);
    code.to_string()
}

/// Keyed digest of one-time codes
///
/// The digest binds the code to its phone number and a server-side pepper.
#[derive(Clone)]
pub struct CodeHasher {
    pepper: String,
}

impl CodeHasher {
    pub fn new(pepper: impl Into<String>) -> Self {
        Self {
            pepper: pepper.into(),
        }
    }

    /// Hex SHA-256 of `pepper:phone:code`
    pub fn digest(&self, phone: &str, code: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.pepper.as_bytes());
        hasher.update(b":");
        hasher.update(phone.as_bytes());
        hasher.update(b":");
        hasher.update(code.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Compare a submitted code against a stored digest in constant time
    pub fn matches(&self, phone: &str, code: &str, stored_digest: &str) -> bool {
        let candidate = self.digest(phone, code);
        if candidate.len() != stored_digest.len() {
            return false;
        }
        constant_time_eq(candidate.as_bytes(), stored_digest.as_bytes())
    }
}

impl std::fmt::Debug for CodeHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeHasher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_format() {
        for _ in 0..1000 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            let value: u32 = code.parse().unwrap();
            assert!((100_000..=999_999).contains(&value));
        }
    }

    #[test]
    fn test_generate_code_varies() {
        let codes: HashSet<String> = (0..100).map(|_| generate_code()).collect();
        assert!(codes.len() > 1);
    }

    #[test]
    fn test_digest_is_hex_sha256() {
        let digest = CodeHasher::new("pepper").digest("9876543210", "123456");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!digest.contains("123456"));
    }

    #[test]
    fn test_digest_binds_phone_and_pepper() {
        let hasher = CodeHasher::new("pepper");
        let base = hasher.digest("9876543210", "123456");

        assert_eq!(base, hasher.digest("9876543210", "123456"));
        assert_ne!(base, hasher.digest("9876543211", "123456"));
        assert_ne!(base, CodeHasher::new("other").digest("9876543210", "123456"));
    }

    #[test]
    fn test_matches() {
        let hasher = CodeHasher::new("pepper");
        let stored = hasher.digest("9876543210", "123456");

        assert!(hasher.matches("9876543210", "123456", &stored));
        assert!(!hasher.matches("9876543210", "654321", &stored));
        assert!(!hasher.matches("9876543210", "123456", "short"));
    }

    #[test]
    fn test_debug_hides_pepper() {
        let rendered = format!("{:?}", CodeHasher::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
    }
}
