//! Password-based key derivation using PBKDF2-HMAC.
//!
//! Every envelope carries its own salt, so a key is derived from
//! `(magic number, salt)` each time an envelope is sealed or opened.
//! Keys are never cached or persisted.
//!
//! The PRF defaults to HMAC-SHA1, which is what envelopes written by
//! the browser build of PassVault use.  HMAC-SHA256 is available for
//! stores written by newer builds (see `KdfDigest`).

use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::TryRngCore;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::errors::{PassVaultError, Result};

/// Fixed PBKDF2 iteration count.  Changing it breaks every stored envelope.
pub const PBKDF2_ITERATIONS: u32 = 10_000;

/// Length of the per-envelope salt in bytes (16 hex characters).
pub const SALT_LEN: usize = 8;

/// Length of the AES-CBC initialization vector in bytes.
pub const IV_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Hash function used as the PBKDF2 pseudo-random function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KdfDigest {
    /// HMAC-SHA1.
    #[default]
    Sha1,
    /// HMAC-SHA256.
    Sha256,
}

/// A 32-byte derived key that zeroes its memory when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Access the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

/// Derive a 32-byte key from a magic number and salt.
///
/// The same passphrase + salt + digest always produces the same key.
pub fn derive_key(passphrase: &[u8], salt: &[u8], digest: KdfDigest) -> DerivedKey {
    let mut bytes = [0u8; KEY_LEN];
    match digest {
        KdfDigest::Sha1 => pbkdf2_hmac::<Sha1>(passphrase, salt, PBKDF2_ITERATIONS, &mut bytes),
        KdfDigest::Sha256 => {
            pbkdf2_hmac::<Sha256>(passphrase, salt, PBKDF2_ITERATIONS, &mut bytes)
        }
    }
    DerivedKey { bytes }
}

/// Generate a cryptographically random 8-byte salt.
pub fn generate_salt() -> Result<[u8; SALT_LEN]> {
    random_bytes()
}

/// Generate a cryptographically random 16-byte IV.
pub fn generate_iv() -> Result<[u8; IV_LEN]> {
    random_bytes()
}

fn random_bytes<const N: usize>() -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| PassVaultError::EncryptionFailed(format!("OS random source: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_key_is_deterministic() {
        let salt = [0x11u8; SALT_LEN];
        let k1 = derive_key(b"1234", &salt, KdfDigest::Sha1);
        let k2 = derive_key(b"1234", &salt, KdfDigest::Sha1);
        assert_eq!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn digest_changes_the_key() {
        let salt = [0x22u8; SALT_LEN];
        let k1 = derive_key(b"1234", &salt, KdfDigest::Sha1);
        let k2 = derive_key(b"1234", &salt, KdfDigest::Sha256);
        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn sha1_uses_fixed_iteration_count() {
        let mut expected = [0u8; KEY_LEN];
        pbkdf2_hmac::<Sha1>(b"password", b"salt", PBKDF2_ITERATIONS, &mut expected);
        let key = derive_key(b"password", b"salt", KdfDigest::Sha1);
        assert_eq!(key.as_bytes(), &expected);
    }

    #[test]
    fn salts_are_random() {
        let a = generate_salt().unwrap();
        let b = generate_salt().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn digest_parses_lowercase_names() {
        let d: KdfDigest = serde_json::from_str("\"sha256\"").unwrap();
        assert_eq!(d, KdfDigest::Sha256);
        assert_eq!(KdfDigest::default(), KdfDigest::Sha1);
    }
}
