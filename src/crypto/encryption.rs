//! AES-256-CBC encryption with PKCS#7 padding.
//!
//! `encrypt` takes a caller-supplied IV and prepends it to the
//! ciphertext.  `decrypt` splits the IV back out before decrypting.
//!
//! Layout of the returned byte buffer:
//!   [ 16-byte IV | ciphertext (multiple of 16 bytes) ]
//!
//! CBC is unauthenticated: a wrong key is detected only through bad
//! padding or non-UTF-8 output further up, never through a tag.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::Aes256;

use super::kdf::IV_LEN;
use crate::errors::{PassVaultError, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES block size in bytes.
const BLOCK_LEN: usize = 16;

/// Encrypt `plaintext` with a 32-byte `key` and 16-byte `iv`.
///
/// Returns the IV prepended to the ciphertext (iv || ciphertext).
pub fn encrypt(key: &[u8], iv: &[u8; IV_LEN], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256CbcEnc::new_from_slices(key, iv)
        .map_err(|e| PassVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut output = Vec::with_capacity(IV_LEN + ciphertext.len());
    output.extend_from_slice(iv);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt data that was produced by `encrypt`.
///
/// Expects the first 16 bytes to be the IV, followed by at least one
/// full cipher block.
pub fn decrypt(key: &[u8], iv_and_ciphertext: &[u8]) -> Result<Vec<u8>> {
    if iv_and_ciphertext.len() < IV_LEN + BLOCK_LEN {
        return Err(PassVaultError::DecryptionFailed);
    }

    let (iv, ciphertext) = iv_and_ciphertext.split_at(IV_LEN);
    if ciphertext.len() % BLOCK_LEN != 0 {
        return Err(PassVaultError::DecryptionFailed);
    }

    let cipher =
        Aes256CbcDec::new_from_slices(key, iv).map_err(|_| PassVaultError::DecryptionFailed)?;

    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| PassVaultError::DecryptionFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ciphertext_is_padded_to_block_size() {
        let key = [0x01u8; 32];
        let iv = [0x02u8; IV_LEN];

        // 16 bytes of plaintext gain a full padding block.
        let out = encrypt(&key, &iv, &[0u8; 16]).unwrap();
        assert_eq!(out.len(), IV_LEN + 32);
        assert_eq!(&out[..IV_LEN], &iv);

        let out = encrypt(&key, &iv, b"").unwrap();
        assert_eq!(out.len(), IV_LEN + 16);
    }

    #[test]
    fn roundtrip_recovers_plaintext() {
        let key = [0x33u8; 32];
        let iv = [0x44u8; IV_LEN];
        let out = encrypt(&key, &iv, b"alice").unwrap();
        assert_eq!(decrypt(&key, &out).unwrap(), b"alice");
    }

    #[test]
    fn rejects_unaligned_ciphertext() {
        let key = [0x33u8; 32];
        let iv = [0x44u8; IV_LEN];
        let mut out = encrypt(&key, &iv, b"alice").unwrap();
        out.pop();
        assert!(decrypt(&key, &out).is_err());
    }

    #[test]
    fn rejects_short_input() {
        let key = [0x33u8; 32];
        assert!(decrypt(&key, &[0u8; IV_LEN]).is_err());
    }

    #[test]
    fn rejects_bad_key_length() {
        let iv = [0u8; IV_LEN];
        assert!(encrypt(&[0u8; 16], &iv, b"x").is_err());
    }
}
