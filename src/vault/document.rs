//! JSON document shapes for persistence, export and import.
//!
//! The persisted and exported document look the same:
//!
//! ```text
//! { "services": { "<name>": { "account": "<envelope>", "password": "<envelope>" } } }
//! ```
//!
//! Import accepts that shape too, but any entry whose fields do not look
//! like envelopes is treated as plaintext and sealed on the way in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::record::ServiceRecord;
use crate::crypto::looks_sealed;
use crate::errors::{PassVaultError, Result};

/// The whole vault as it is written to the backend or exported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultDocument {
    pub services: BTreeMap<String, ServiceRecord>,
}

impl VaultDocument {
    /// Parse a stored document.
    ///
    /// Accepts the wrapped `{ "services": {...} }` shape and, for stores
    /// written before the wrapper existed, a bare services map.
    pub fn parse(raw: &str) -> Result<Self> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Stored {
            Wrapped(VaultDocument),
            Bare(BTreeMap<String, ServiceRecord>),
        }

        let stored: Stored = serde_json::from_str(raw)
            .map_err(|e| PassVaultError::SerializationError(format!("vault document: {e}")))?;

        Ok(match stored {
            Stored::Wrapped(doc) => doc,
            Stored::Bare(services) => Self { services },
        })
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PassVaultError::SerializationError(format!("vault document: {e}")))
    }
}

/// A document handed to `VaultStore::import_document`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportDocument {
    pub services: BTreeMap<String, ImportEntry>,
}

/// One imported entry; fields may be envelopes or plaintext.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ImportEntry {
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl ImportEntry {
    /// Both fields are present.
    pub fn is_complete(&self) -> bool {
        self.account.is_some() && self.password.is_some()
    }

    /// Both fields look like envelopes (see `crypto::looks_sealed`).
    pub fn is_sealed(&self) -> bool {
        matches!(
            (&self.account, &self.password),
            (Some(a), Some(p)) if looks_sealed(a) && looks_sealed(p)
        )
    }
}

impl ImportDocument {
    /// Parse an import file's contents.
    ///
    /// Fails with `InvalidDocument` on bad JSON, a missing `services`
    /// key, or fields that are not strings.
    pub fn parse(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| PassVaultError::InvalidDocument(format!("failed to parse JSON: {e}")))?;

        if value.get("services").is_none() {
            return Err(PassVaultError::InvalidDocument(
                "JSON missing 'services' key".into(),
            ));
        }

        serde_json::from_value(value).map_err(|e| PassVaultError::InvalidDocument(e.to_string()))
    }

    /// True if at least one complete entry needs sealing on import.
    pub fn has_plaintext_entries(&self) -> bool {
        self.services
            .values()
            .any(|entry| entry.is_complete() && !entry.is_sealed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Envelope;

    const SEALED: &str = "0123456789abcdef:AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";

    #[test]
    fn parse_wrapped_document() {
        let raw = format!(
            r#"{{"services":{{"github":{{"account":"{SEALED}","password":"{SEALED}"}}}}}}"#
        );
        let doc = VaultDocument::parse(&raw).unwrap();
        assert_eq!(doc.services.len(), 1);
        assert_eq!(doc.services["github"].account.as_str(), SEALED);
    }

    #[test]
    fn parse_bare_services_map() {
        let raw = format!(r#"{{"mail":{{"account":"{SEALED}","password":"{SEALED}"}}}}"#);
        let doc = VaultDocument::parse(&raw).unwrap();
        assert!(doc.services.contains_key("mail"));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(VaultDocument::parse("not json").is_err());
        assert!(VaultDocument::parse("[1,2,3]").is_err());
    }

    #[test]
    fn pretty_json_has_services_key() {
        let mut doc = VaultDocument::default();
        doc.services.insert(
            "a".into(),
            ServiceRecord {
                account: Envelope::from_sealed(SEALED),
                password: Envelope::from_sealed(SEALED),
            },
        );
        let json = doc.to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["services"]["a"]["account"], SEALED);
    }

    #[test]
    fn import_requires_services_key() {
        let err = ImportDocument::parse(r#"{"other":{}}"#).unwrap_err();
        assert!(err.to_string().contains("services"));
    }

    #[test]
    fn import_rejects_non_string_fields() {
        let raw = r#"{"services":{"a":{"account":1,"password":"x"}}}"#;
        assert!(matches!(
            ImportDocument::parse(raw),
            Err(PassVaultError::InvalidDocument(_))
        ));
    }

    #[test]
    fn import_detects_plaintext_entries() {
        let raw = format!(
            r#"{{"services":{{
                "sealed":{{"account":"{SEALED}","password":"{SEALED}"}},
                "plain":{{"account":"alice","password":"p@ss"}},
                "partial":{{"account":"bob"}}
            }}}}"#
        );
        let doc = ImportDocument::parse(&raw).unwrap();
        assert!(doc.services["sealed"].is_sealed());
        assert!(!doc.services["plain"].is_sealed());
        assert!(!doc.services["partial"].is_complete());
        assert!(doc.has_plaintext_entries());
    }

    #[test]
    fn mixed_fields_count_as_plaintext() {
        let entry = ImportEntry {
            account: Some(SEALED.into()),
            password: Some("hunter2".into()),
        };
        assert!(!entry.is_sealed());
    }
}
