//! `passvault export` — write the encrypted vault document as JSON.
//!
//! The export holds envelopes only, so it can be stored anywhere and
//! imported back later with no extra metadata.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::output;
use crate::cli::{load_settings, open_store, Cli};
use crate::config::Settings;
use crate::errors::{PassVaultError, Result};

/// Execute the `export` command.
pub fn execute(cli: &Cli, output_path: Option<&str>) -> Result<()> {
    let settings = load_settings()?;
    let store = open_store(cli, &settings)?;

    let content = store.export_document().to_json_pretty()?;

    match output_path {
        Some(dest) => {
            let dest_path = resolve_destination(Path::new(dest), &settings);

            fs::write(&dest_path, format!("{content}\n")).map_err(|e| {
                PassVaultError::CommandFailed(format!("failed to write export file: {e}"))
            })?;

            output::success(&format!(
                "Exported {} services to {}",
                store.len(),
                dest_path.display()
            ));
        }
        None => {
            // Write to stdout (no success message, just raw output).
            println!("{content}");
        }
    }

    Ok(())
}

/// A directory destination gets the configured export file name.
fn resolve_destination(dest: &Path, settings: &Settings) -> PathBuf {
    if dest.is_dir() {
        dest.join(&settings.export_file)
    } else {
        dest.to_path_buf()
    }
}
