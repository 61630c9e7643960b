//! `passvault list` — display all service names in a table.

use crate::cli::output;
use crate::cli::{load_settings, open_store, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings()?;
    let store = open_store(cli, &settings)?;

    output::info(&format!("{} service(s)", store.len()));
    output::print_services_table(store.list());

    Ok(())
}
