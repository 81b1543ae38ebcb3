//! Password hashing with HMAC-SHA512 keyed by a per-user random key.
//!
//! The key is stored as the user's salt and the MAC as the hash.

use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

const KEY_LEN: usize = 128;

pub struct PasswordDigest {
    pub hash: Vec<u8>,
    pub salt: Vec<u8>,
}

/// Hash a password under a freshly generated key.
pub fn hash_password(password: &str) -> PasswordDigest {
    let mut salt = vec![0u8; KEY_LEN];
    OsRng.fill_bytes(&mut salt);
    let hash = keyed_mac(&salt, password).finalize().into_bytes().to_vec();
    PasswordDigest { hash, salt }
}

/// Recompute the MAC with the stored key and compare in constant time.
pub fn verify_password(password: &str, hash: &[u8], salt: &[u8]) -> bool {
    keyed_mac(salt, password).verify_slice(hash).is_ok()
}

fn keyed_mac(key: &[u8], password: &str) -> HmacSha512 {
    let mut mac =
        <HmacSha512 as Mac>::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(password.as_bytes());
    mac
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let digest = hash_password("mysecret");
        assert_eq!(digest.salt.len(), KEY_LEN);
        assert_eq!(digest.hash.len(), 64);
        assert!(verify_password("mysecret", &digest.hash, &digest.salt));
        assert!(!verify_password("wrongpassword", &digest.hash, &digest.salt));
    }

    #[test]
    fn test_same_password_gets_fresh_salt() {
        let a = hash_password("password1");
        let b = hash_password("password1");
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn test_truncated_hash_fails() {
        let digest = hash_password("pw");
        assert!(!verify_password("pw", &digest.hash[..10], &digest.salt));
    }
}
