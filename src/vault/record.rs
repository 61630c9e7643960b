//! ServiceRecord and Credentials types stored inside a vault.
//!
//! A `ServiceRecord` is what lands on disk: two envelopes, never
//! plaintext.  `Credentials` is what `find` hands back after opening
//! them, and wipes itself on drop.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::Envelope;

/// One encrypted account/password pair, keyed by service name in the vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// The sealed account name.
    pub account: Envelope,

    /// The sealed password.
    pub password: Envelope,
}

/// Decrypted account/password pair.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    pub account: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("password", &"********")
            .finish()
    }
}
