//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - PBKDF2 key derivation and random salt/IV generation (`kdf`)
//! - AES-256-CBC encryption and decryption (`encryption`)
//! - The `salt:base64(iv||ciphertext)` envelope codec (`envelope`)

pub mod encryption;
pub mod envelope;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, Envelope, ...};
pub use envelope::{decrypt, encrypt, is_canonical, looks_sealed, open, Codec, Envelope};
pub use kdf::{derive_key, generate_iv, generate_salt, KdfDigest, PBKDF2_ITERATIONS};
