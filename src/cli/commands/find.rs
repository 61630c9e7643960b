//! `passvault find` — decrypt and print a service's credentials.

use crate::cli::output;
use crate::cli::{load_settings, open_store, prompt_magic, service_arg, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `find` command.
pub fn execute(cli: &Cli, service: &str) -> Result<()> {
    let service = service_arg(service)?;

    let settings = load_settings()?;
    let store = open_store(cli, &settings)?;

    // Fail on an unknown service before asking for the magic number.
    if !store.contains(service) {
        return Err(PassVaultError::ServiceNotFound(service.to_string()));
    }

    let magic = prompt_magic("Magic number")?;
    let creds = store.find(service, &magic)?;

    output::print_credentials(&creds);
    output::success(&format!("Found \"{service}\""));

    Ok(())
}
