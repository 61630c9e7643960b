//! Vault module — encrypted account/password storage.
//!
//! This module provides:
//! - `ServiceRecord` and `Credentials` types (`record`)
//! - Persisted, exported and imported JSON shapes (`document`)
//! - The whole-document persistence port and its implementations (`backend`)
//! - High-level `VaultStore` for adding, finding and removing services (`store`)

pub mod backend;
pub mod document;
pub mod record;
pub mod store;

// Re-export the most commonly used items.
pub use backend::{Backend, FileBackend, MemoryBackend, STORE_FILE_NAME};
pub use document::{ImportDocument, ImportEntry, VaultDocument};
pub use record::{Credentials, ServiceRecord};
pub use store::{ImportSummary, ServiceNames, VaultStore};
