//! Persistence port for the vault document.
//!
//! The store only ever reads the whole document or overwrites it, so a
//! backend is two calls: `read` and `write`.  `FileBackend` keeps the
//! document in one JSON file; `MemoryBackend` keeps it in process.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::Result;

/// Fixed file name of the vault document inside the vault directory.
pub const STORE_FILE_NAME: &str = "ppm_services_v1.json";

/// Whole-document storage for a vault.
pub trait Backend {
    /// Read the stored document, or `None` if nothing has been written yet.
    fn read(&self) -> Result<Option<String>>;

    /// Replace the stored document.
    fn write(&mut self, document: &str) -> Result<()>;
}

/// A vault document stored as a single file on disk.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Back the vault with `<vault_dir>/ppm_services_v1.json`.
    pub fn in_dir(vault_dir: &Path) -> Self {
        Self {
            path: vault_dir.join(STORE_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Backend for FileBackend {
    fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    /// Write the document **atomically** via temp file + rename.
    ///
    /// The temp file is in the same directory so the rename stays on one
    /// filesystem; readers never see a half-written document.
    fn write(&mut self, document: &str) -> Result<()> {
        let parent = self.path.parent().unwrap_or(Path::new("."));
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ));

        fs::write(&tmp_path, document)?;

        // On Unix, restrict permissions to owner-only read/write.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

/// An in-process backend, for tests and embedding hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    document: Option<String>,
    writes: usize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing document.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
            writes: 0,
        }
    }

    /// The last document written (or seeded).
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Number of `write` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl Backend for MemoryBackend {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.document.clone())
    }

    fn write(&mut self, document: &str) -> Result<()> {
        self.document = Some(document.to_string());
        self.writes += 1;
        Ok(())
    }
}
