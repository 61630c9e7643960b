//! `passvault add` — seal a service's account and password into the vault.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{load_settings, open_store, prompt_magic, service_arg, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `add` command.
pub fn execute(cli: &Cli, service: &str, account: Option<&str>) -> Result<()> {
    let service = service_arg(service)?;
    let piped = !io::stdin().is_terminal();

    let account = match account {
        Some(a) => a.to_string(),
        // The account prompt needs a terminal that piped input takes away.
        None if piped => {
            return Err(PassVaultError::Validation(
                "Pass --account when piping the password on stdin".into(),
            ));
        }
        None => dialoguer::Input::<String>::new()
            .with_prompt(format!("Account for {service}"))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| PassVaultError::CommandFailed(format!("input prompt: {e}")))?,
    };

    let password = if piped {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        Zeroizing::new(buf.trim_end_matches(['\r', '\n']).to_string())
    } else {
        let p = dialoguer::Password::new()
            .with_prompt(format!("Password for {service}"))
            .allow_empty_password(true)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("input prompt: {e}")))?;
        Zeroizing::new(p)
    };

    let magic = prompt_magic("Magic number")?;

    let settings = load_settings()?;
    let mut store = open_store(cli, &settings)?;
    let replaced = store.add(service, &account, &password, &magic)?;

    if replaced {
        output::success(&format!("Updated \"{service}\" ({} total)", store.len()));
    } else {
        output::success(&format!("Added \"{service}\" ({} total)", store.len()));
    }

    Ok(())
}
