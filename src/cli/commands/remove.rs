//! `passvault remove` — delete a service from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{load_settings, open_store, service_arg, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `remove` command.
pub fn execute(cli: &Cli, service: &str, force: bool) -> Result<()> {
    let service = service_arg(service)?;

    let settings = load_settings()?;
    let mut store = open_store(cli, &settings)?;

    if !store.contains(service) {
        output::info(&format!("No service named \"{service}\"; nothing removed."));
        return Ok(());
    }

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove \"{service}\"?"))
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    store.remove(service)?;
    output::success(&format!("Removed \"{service}\""));

    Ok(())
}
