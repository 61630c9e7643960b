//! `passvault import` — merge services from a JSON file.
//!
//! Two shapes are accepted, both under a top-level `services` key:
//! - an export from `passvault export` (fields are envelopes, kept as-is)
//! - plaintext `{"account": "...", "password": "..."}` entries, which are
//!   sealed with a magic number asked for only when such entries exist

use std::fs;
use std::path::Path;

use crate::cli::output;
use crate::cli::{load_settings, open_store, prompt_magic, Cli};
use crate::errors::{PassVaultError, Result};
use crate::vault::ImportDocument;

/// Execute the `import` command.
pub fn execute(cli: &Cli, file_path: &str) -> Result<()> {
    let source = Path::new(file_path);

    if !source.exists() {
        return Err(PassVaultError::CommandFailed(format!(
            "import file not found: {}",
            source.display()
        )));
    }

    let content = fs::read_to_string(source)
        .map_err(|e| PassVaultError::CommandFailed(format!("failed to read file: {e}")))?;
    let doc = ImportDocument::parse(&content)?;

    if doc.services.is_empty() {
        output::warning("No services found in the import file.");
        return Ok(());
    }

    let magic = if doc.has_plaintext_entries() {
        output::info("Imported file contains plaintext entries.");
        Some(prompt_magic("Magic number to encrypt them with")?)
    } else {
        None
    };

    let settings = load_settings()?;
    let mut store = open_store(cli, &settings)?;
    let summary = store.import_document(doc, magic.as_deref().map(String::as_str))?;

    if summary.skipped > 0 {
        output::warning(&format!(
            "Skipped {} entries without both account and password.",
            summary.skipped
        ));
    }

    output::success(&format!(
        "Import finished: {} services from {} ({} already encrypted, {} encrypted now)",
        summary.imported(),
        source.display(),
        summary.sealed,
        summary.encrypted
    ));

    Ok(())
}
