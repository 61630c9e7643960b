//! High-level vault operations used by CLI commands.
//!
//! `VaultStore` owns the in-memory services map, seals and opens
//! records through the envelope `Codec`, and rewrites the whole
//! document to its `Backend` after every mutation.

use std::collections::btree_map::{self, BTreeMap};
use std::iter::FusedIterator;

use tracing::{debug, warn};

use crate::crypto::{Codec, Envelope};
use crate::errors::{PassVaultError, Result};

use super::backend::Backend;
use super::document::{ImportDocument, VaultDocument};
use super::record::{Credentials, ServiceRecord};

/// Outcome of `VaultStore::import_document`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Entries taken as-is because they already looked sealed.
    pub sealed: usize,
    /// Plaintext entries sealed with the supplied magic number.
    pub encrypted: usize,
    /// Entries skipped because a field was missing.
    pub skipped: usize,
}

impl ImportSummary {
    /// Number of records merged into the vault.
    pub fn imported(&self) -> usize {
        self.sealed + self.encrypted
    }
}

/// The main vault handle.  Create one with `VaultStore::load`, then use
/// its methods to manage services.
pub struct VaultStore<B: Backend> {
    /// Where the whole document is read from and written to.
    backend: B,

    /// In-memory map of service name -> sealed record.
    services: BTreeMap<String, ServiceRecord>,

    /// Envelope codec (carries the configured KDF digest).
    codec: Codec,
}

impl<B: Backend> VaultStore<B> {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Load the vault from `backend` with the default codec.
    ///
    /// Never fails: a missing or unreadable document yields an empty vault.
    pub fn load(backend: B) -> Self {
        Self::load_with_codec(backend, Codec::default())
    }

    /// Load the vault from `backend`, sealing new records with `codec`.
    pub fn load_with_codec(backend: B, codec: Codec) -> Self {
        let services = match backend.read() {
            Ok(Some(raw)) => match VaultDocument::parse(&raw) {
                Ok(doc) => doc.services,
                Err(e) => {
                    warn!(error = %e, "stored vault document is unreadable, starting empty");
                    BTreeMap::new()
                }
            },
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                warn!(error = %e, "failed to read vault backend, starting empty");
                BTreeMap::new()
            }
        };

        debug!(services = services.len(), "vault loaded");

        Self {
            backend,
            services,
            codec,
        }
    }

    // ------------------------------------------------------------------
    // Service operations
    // ------------------------------------------------------------------

    /// Seal `account` and `password` under `passphrase` and store them
    /// under `service`, replacing any existing record.
    ///
    /// Returns `true` if a record was replaced.
    pub fn add(
        &mut self,
        service: &str,
        account: &str,
        password: &str,
        passphrase: &str,
    ) -> Result<bool> {
        Self::validate_service_name(service)?;
        Self::validate_passphrase(passphrase)?;

        let record = self.seal_record(account, password, passphrase)?;
        let mut next = self.services.clone();
        let replaced = next.insert(service.to_string(), record).is_some();
        self.commit(next)?;

        debug!(service, replaced, "service stored");
        Ok(replaced)
    }

    /// Remove a service.
    ///
    /// An unknown name is a no-op: nothing is written and `Ok(false)` is
    /// returned.
    pub fn remove(&mut self, service: &str) -> Result<bool> {
        Self::validate_service_name(service)?;

        let Some(record) = self.services.remove(service) else {
            debug!(service, "remove: no such service");
            return Ok(false);
        };
        if let Err(e) = self.save() {
            self.services.insert(service.to_string(), record);
            return Err(e);
        }

        debug!(service, "service removed");
        Ok(true)
    }

    /// Decrypt the record for `service` with `passphrase`.
    ///
    /// If neither field opens the magic number is wrong
    /// (`DecryptionFailed`); if only one opens the record is damaged
    /// (`CorruptedRecord`).  Stored empty strings come back as empty
    /// strings.
    pub fn find(&self, service: &str, passphrase: &str) -> Result<Credentials> {
        Self::validate_service_name(service)?;
        Self::validate_passphrase(passphrase)?;

        let record = self
            .services
            .get(service)
            .ok_or_else(|| PassVaultError::ServiceNotFound(service.to_string()))?;

        let account = self.codec.open(record.account.as_str(), passphrase);
        let password = self.codec.open(record.password.as_str(), passphrase);

        match (account, password) {
            (Ok(account), Ok(password)) => Ok(Credentials { account, password }),
            (Err(_), Err(_)) => Err(PassVaultError::DecryptionFailed),
            (Err(_), Ok(_)) => Err(PassVaultError::CorruptedRecord {
                service: service.to_string(),
                field: "account",
            }),
            (Ok(_), Err(_)) => Err(PassVaultError::CorruptedRecord {
                service: service.to_string(),
                field: "password",
            }),
        }
    }

    /// Service names in lexicographic order.
    ///
    /// The iterator is lazy and borrows the store; call `list` again to
    /// restart.
    pub fn list(&self) -> ServiceNames<'_> {
        ServiceNames {
            inner: self.services.keys(),
        }
    }

    /// The persisted-shape document: envelopes only, never plaintext.
    pub fn export_document(&self) -> VaultDocument {
        VaultDocument {
            services: self.services.clone(),
        }
    }

    /// Merge `doc` into the vault, overwriting on name collisions.
    ///
    /// Entries whose fields both look sealed are kept byte-for-byte.
    /// Anything else is plaintext and is sealed with
    /// `plaintext_passphrase`, which must then be present.  Entries
    /// missing a field are skipped.  Nothing is merged unless every
    /// record is prepared and the merged document is written.
    pub fn import_document(
        &mut self,
        doc: ImportDocument,
        plaintext_passphrase: Option<&str>,
    ) -> Result<ImportSummary> {
        let passphrase = plaintext_passphrase.filter(|p| !p.is_empty());
        if doc.has_plaintext_entries() && passphrase.is_none() {
            return Err(PassVaultError::PassphraseRequired);
        }

        let mut summary = ImportSummary::default();
        let mut prepared = Vec::with_capacity(doc.services.len());

        for (name, entry) in doc.services {
            if name.trim().is_empty() {
                return Err(PassVaultError::InvalidDocument(
                    "service name cannot be empty".into(),
                ));
            }

            let sealed = entry.is_sealed();
            let (Some(account), Some(password)) = (entry.account, entry.password) else {
                warn!(service = %name, "import: entry lacks account or password, skipped");
                summary.skipped += 1;
                continue;
            };

            let record = if sealed {
                summary.sealed += 1;
                ServiceRecord {
                    account: Envelope::from_sealed(account),
                    password: Envelope::from_sealed(password),
                }
            } else {
                summary.encrypted += 1;
                // Checked above: plaintext entries imply a passphrase.
                let passphrase = passphrase.ok_or(PassVaultError::PassphraseRequired)?;
                self.seal_record(&account, &password, passphrase)?
            };
            prepared.push((name, record));
        }

        let mut next = self.services.clone();
        next.extend(prepared);
        self.commit(next)?;

        debug!(
            sealed = summary.sealed,
            encrypted = summary.encrypted,
            skipped = summary.skipped,
            "import merged"
        );
        Ok(summary)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Serialize the whole vault and hand it to the backend.
    pub fn save(&mut self) -> Result<()> {
        Self::write_services(&mut self.backend, &self.services)
    }

    /// Write `next` and adopt it only once the backend accepted it.
    fn commit(&mut self, next: BTreeMap<String, ServiceRecord>) -> Result<()> {
        Self::write_services(&mut self.backend, &next)?;
        self.services = next;
        Ok(())
    }

    fn write_services(
        backend: &mut B,
        services: &BTreeMap<String, ServiceRecord>,
    ) -> Result<()> {
        let json = serde_json::to_string(&VaultDocumentRef { services })
            .map_err(|e| PassVaultError::SerializationError(format!("vault document: {e}")))?;
        backend.write(&json)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the number of services in the vault.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Returns `true` if the vault has a record for `service`.
    ///
    /// Metadata-only check; nothing is decrypted.
    pub fn contains(&self, service: &str) -> bool {
        self.services.contains_key(service)
    }

    /// The sealed record for `service`, if any.
    pub fn record(&self, service: &str) -> Option<&ServiceRecord> {
        self.services.get(service)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn seal_record(
        &self,
        account: &str,
        password: &str,
        passphrase: &str,
    ) -> Result<ServiceRecord> {
        Ok(ServiceRecord {
            account: self.codec.encrypt(account, passphrase)?,
            password: self.codec.encrypt(password, passphrase)?,
        })
    }

    /// Service names are arbitrary text but must not be blank.
    fn validate_service_name(service: &str) -> Result<()> {
        if service.trim().is_empty() {
            return Err(PassVaultError::Validation(
                "Please provide a service name".into(),
            ));
        }
        Ok(())
    }

    fn validate_passphrase(passphrase: &str) -> Result<()> {
        if passphrase.is_empty() {
            return Err(PassVaultError::Validation("Magic number required".into()));
        }
        Ok(())
    }
}

/// Borrowing twin of `VaultDocument`, so `save` doesn't clone the map.
#[derive(serde::Serialize)]
struct VaultDocumentRef<'a> {
    services: &'a BTreeMap<String, ServiceRecord>,
}

/// Iterator over service names, returned by `VaultStore::list`.
#[derive(Debug, Clone)]
pub struct ServiceNames<'a> {
    inner: btree_map::Keys<'a, String, ServiceRecord>,
}

impl<'a> Iterator for ServiceNames<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for ServiceNames<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(String::as_str)
    }
}

impl ExactSizeIterator for ServiceNames<'_> {}

impl FusedIterator for ServiceNames<'_> {}
