//! Property tests for the envelope codec.
//!
//! Each case runs PBKDF2 at the full iteration count, so the case count
//! is kept low.

use passvault::crypto::{decrypt, encrypt, is_canonical, looks_sealed};
use proptest::prelude::*;

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 24,
        ..ProptestConfig::default()
    }
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn roundtrip(plaintext in any::<String>(), passphrase in "\\PC{1,32}") {
        let envelope = encrypt(&plaintext, &passphrase).unwrap();
        prop_assert_eq!(decrypt(envelope.as_str(), &passphrase), plaintext);
    }

    #[test]
    fn produced_envelopes_match_format(plaintext in any::<String>(), passphrase in "\\PC{1,32}") {
        let envelope = encrypt(&plaintext, &passphrase).unwrap();
        prop_assert!(is_canonical(envelope.as_str()));
        prop_assert!(looks_sealed(envelope.as_str()));
    }

    #[test]
    fn repeated_encryption_differs(plaintext in any::<String>(), passphrase in "\\PC{1,32}") {
        let a = encrypt(&plaintext, &passphrase).unwrap();
        let b = encrypt(&plaintext, &passphrase).unwrap();
        prop_assert_ne!(a, b);
    }

    #[test]
    fn wrong_passphrase_yields_empty(
        plaintext in "[a-zA-Z0-9 ]{8,64}",
        p1 in "[a-z0-9]{4,16}",
        p2 in "[a-z0-9]{4,16}",
    ) {
        prop_assume!(p1 != p2);
        let envelope = encrypt(&plaintext, &p1).unwrap();
        prop_assert_eq!(decrypt(envelope.as_str(), &p2), "");
    }
}
