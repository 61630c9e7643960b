use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::{Codec, KdfDigest};
use crate::errors::{PassVaultError, Result};
use crate::vault::STORE_FILE_NAME;

/// Project-level configuration, loaded from `.passvault.toml`.
///
/// Every field has a sensible default so PassVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to project root) holding the vault document.
    #[serde(default = "default_vault_dir")]
    pub vault_dir: String,

    /// PBKDF2 PRF: "sha1" (default) or "sha256".
    #[serde(default)]
    pub kdf_digest: KdfDigest,

    /// File name `export` writes to when `--output` is a directory.
    #[serde(default = "default_export_file")]
    pub export_file: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_dir() -> String {
    ".passvault".to_string()
}

fn default_export_file() -> String {
    "ppm_export.json".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_dir: default_vault_dir(),
            kdf_digest: KdfDigest::default(),
            export_file: default_export_file(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".passvault.toml";

    /// Load settings from `<project_dir>/.passvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Full path to the vault directory.
    ///
    /// Example: `project_dir/.passvault`
    pub fn vault_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.vault_dir)
    }

    /// Full path to the vault document.
    ///
    /// Example: `project_dir/.passvault/ppm_services_v1.json`
    pub fn store_path(&self, project_dir: &Path) -> PathBuf {
        self.vault_dir(project_dir).join(STORE_FILE_NAME)
    }

    /// Envelope codec for the configured digest.
    pub fn codec(&self) -> Codec {
        Codec::new(self.kdf_digest)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
