//! Envelope format: one encrypted field as a self-contained string.
//!
//! ```text
//! <salt: 16 lowercase hex chars>:<base64(iv[16] || AES-256-CBC ciphertext)>
//! ```
//!
//! Each envelope carries its own random salt and IV, so sealing the same
//! value twice never produces the same string, and nothing besides the
//! magic number is needed to open it later.

use std::fmt;
use std::sync::LazyLock;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use regex::Regex;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::encryption;
use super::kdf::{self, KdfDigest};
use crate::errors::{PassVaultError, Result};

/// Separator between the salt and the body.
const SEPARATOR: char = ':';

/// Shortest salt segment the import heuristic accepts as "already sealed".
const MIN_SALT_CHARS: usize = 16;

/// Exact shape of an envelope produced by `Codec::encrypt`.
static CANONICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-f]{16}:[A-Za-z0-9+/=]+$").unwrap());

/// An encrypted field as stored in the vault document.
///
/// Deserialization accepts any string: imported envelopes are opaque and
/// are kept byte-for-byte.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Envelope(String);

impl Envelope {
    /// Wrap a string that is already in envelope form.
    pub fn from_sealed(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

// Envelopes hold no plaintext, but keep them out of debug output anyway.
impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let salt = self.0.split(SEPARATOR).next().unwrap_or_default();
        write!(f, "Envelope({salt}:…)")
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Envelope {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Seals and opens envelopes under a given KDF digest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Codec {
    digest: KdfDigest,
}

impl Codec {
    pub fn new(digest: KdfDigest) -> Self {
        Self { digest }
    }

    pub fn digest(&self) -> KdfDigest {
        self.digest
    }

    /// Encrypt `plaintext` under `passphrase` with a fresh salt and IV.
    pub fn encrypt(&self, plaintext: &str, passphrase: &str) -> Result<Envelope> {
        let salt = kdf::generate_salt()?;
        let iv = kdf::generate_iv()?;
        let key = kdf::derive_key(passphrase.as_bytes(), &salt, self.digest);

        let body = encryption::encrypt(key.as_bytes(), &iv, plaintext.as_bytes())?;

        Ok(Envelope(format!(
            "{}{SEPARATOR}{}",
            hex::encode(salt),
            BASE64.encode(body)
        )))
    }

    /// Decrypt an envelope, reporting every failure as `DecryptionFailed`.
    ///
    /// Bad shape, bad hex, bad base64, bad padding and non-UTF-8 output
    /// all look the same to the caller.
    pub fn open(&self, envelope: &str, passphrase: &str) -> Result<String> {
        let (salt_hex, body_b64) = envelope
            .split_once(SEPARATOR)
            .ok_or(PassVaultError::DecryptionFailed)?;
        if salt_hex.is_empty() || body_b64.is_empty() {
            return Err(PassVaultError::DecryptionFailed);
        }

        let salt = hex::decode(salt_hex).map_err(|_| PassVaultError::DecryptionFailed)?;
        let body = BASE64
            .decode(body_b64)
            .map_err(|_| PassVaultError::DecryptionFailed)?;

        let key = kdf::derive_key(passphrase.as_bytes(), &salt, self.digest);
        let plaintext = encryption::decrypt(key.as_bytes(), &body)?;

        String::from_utf8(plaintext).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            PassVaultError::DecryptionFailed
        })
    }

    /// Decrypt an envelope, returning an empty string on any failure.
    ///
    /// A stored empty string and a wrong magic number are
    /// indistinguishable here; use `open` when that matters.
    pub fn decrypt(&self, envelope: &str, passphrase: &str) -> String {
        self.open(envelope, passphrase).unwrap_or_default()
    }
}

/// Encrypt with the default (HMAC-SHA1) codec.
pub fn encrypt(plaintext: &str, passphrase: &str) -> Result<Envelope> {
    Codec::default().encrypt(plaintext, passphrase)
}

/// Open with the default (HMAC-SHA1) codec.
pub fn open(envelope: &str, passphrase: &str) -> Result<String> {
    Codec::default().open(envelope, passphrase)
}

/// Soft-fail decrypt with the default (HMAC-SHA1) codec.
pub fn decrypt(envelope: &str, passphrase: &str) -> String {
    Codec::default().decrypt(envelope, passphrase)
}

/// Heuristic used on import: does `value` look like an envelope?
///
/// True when the value has exactly one `:` and at least 16 characters
/// before it.  A plaintext password shaped like that will be taken as
/// sealed, so this is a guess, not a guarantee.
pub fn looks_sealed(value: &str) -> bool {
    match value.split_once(SEPARATOR) {
        Some((salt, rest)) => {
            !rest.contains(SEPARATOR) && salt.chars().count() >= MIN_SALT_CHARS
        }
        None => false,
    }
}

/// Strict check that `value` has the exact shape this crate produces.
pub fn is_canonical(value: &str) -> bool {
    CANONICAL.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sealed_value_has_canonical_shape() {
        let env = encrypt("alice", "1234").unwrap();
        assert!(is_canonical(env.as_str()), "got {env}");
        assert!(looks_sealed(env.as_str()));
    }

    #[test]
    fn open_recovers_plaintext() {
        let env = encrypt("p@ss", "1234").unwrap();
        assert_eq!(open(env.as_str(), "1234").unwrap(), "p@ss");
    }

    #[test]
    fn empty_plaintext_roundtrips_through_open() {
        let env = encrypt("", "1234").unwrap();
        assert_eq!(open(env.as_str(), "1234").unwrap(), "");
    }

    #[test]
    fn open_rejects_missing_separator() {
        assert!(open("0011223344556677", "1234").is_err());
        assert_eq!(decrypt("no-separator-here", "1234"), "");
    }

    #[test]
    fn open_rejects_empty_parts() {
        assert!(open(":AAAA", "1234").is_err());
        assert!(open("0011223344556677:", "1234").is_err());
    }

    #[test]
    fn open_rejects_non_hex_salt() {
        let env = encrypt("alice", "1234").unwrap();
        let (_, body) = env.as_str().split_once(':').unwrap();
        let tampered = format!("zzzzzzzzzzzzzzzz:{body}");
        assert!(open(&tampered, "1234").is_err());
    }

    #[test]
    fn open_rejects_bad_base64() {
        assert!(open("0011223344556677:!!!not-base64!!!", "1234").is_err());
    }

    #[test]
    fn sha256_codec_cannot_open_sha1_envelope() {
        let env = encrypt("alice", "1234").unwrap();
        let sha256 = Codec::new(KdfDigest::Sha256);
        // Either bad padding or garbage bytes; both surface as an error or
        // as a string that differs from the original.
        match sha256.open(env.as_str(), "1234") {
            Ok(s) => assert_ne!(s, "alice"),
            Err(e) => assert!(matches!(e, PassVaultError::DecryptionFailed)),
        }
    }

    #[test]
    fn looks_sealed_heuristic() {
        assert!(looks_sealed("0123456789abcdef:AAAA"));
        assert!(looks_sealed("0123456789abcdef0000:AAAA"));
        assert!(!looks_sealed("0123456789abcde:AAAA"));
        assert!(!looks_sealed("alice"));
        assert!(!looks_sealed("0123456789abcdef:AA:AA"));
        assert!(!looks_sealed(""));
    }

    #[test]
    fn is_canonical_rejects_uppercase_salt() {
        assert!(!is_canonical("0123456789ABCDEF:AAAA"));
        assert!(!is_canonical("0123456789abcdef:"));
        assert!(is_canonical("0123456789abcdef:AAAA/+=="));
    }

    #[test]
    fn debug_hides_body() {
        let env = Envelope::from_sealed("0123456789abcdef:SECRETBODY");
        let dbg = format!("{env:?}");
        assert!(dbg.contains("0123456789abcdef"));
        assert!(!dbg.contains("SECRETBODY"));
    }
}
