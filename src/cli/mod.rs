//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{PassVaultError, Result};
use crate::vault::{FileBackend, VaultStore};

/// Environment variable consulted before prompting for the magic number.
pub const MAGIC_ENV_VAR: &str = "PASSVAULT_MAGIC";

/// PassVault CLI: encrypted account/password vault.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Encrypted account/password vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: from .passvault.toml, else .passvault)
    #[arg(long, global = true)]
    pub vault_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Add or replace a service's account and password
    Add {
        /// Service name (e.g. github)
        service: String,
        /// Account name (omit for interactive prompt; required when piping)
        #[arg(short, long)]
        account: Option<String>,
    },

    /// Decrypt and show a service's account and password
    Find {
        /// Service name
        service: String,
    },

    /// Remove a service
    Remove {
        /// Service name
        service: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// List all services
    List,

    /// Export the encrypted vault as JSON
    Export {
        /// Output file or directory (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Import services from a JSON file (encrypted or plaintext)
    Import {
        /// Path to the JSON file to import
        file: String,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load `.passvault.toml` from the current directory.
pub fn load_settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

/// Resolve the vault directory: `--vault-dir` wins over the config file.
pub fn vault_dir(cli: &Cli, settings: &Settings) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match &cli.vault_dir {
        Some(dir) => cwd.join(dir),
        None => settings.vault_dir(&cwd),
    })
}

/// Load the file-backed vault the CLI arguments point at.
pub fn open_store(cli: &Cli, settings: &Settings) -> Result<VaultStore<FileBackend>> {
    let dir = vault_dir(cli, settings)?;
    Ok(VaultStore::load_with_codec(
        FileBackend::in_dir(&dir),
        settings.codec(),
    ))
}

/// Get the magic number, trying in order:
/// 1. `PASSVAULT_MAGIC` env var (scripts)
/// 2. Interactive hidden prompt
///
/// Returns `Zeroizing<String>` so the magic number is wiped from memory on drop.
pub fn prompt_magic(prompt: &str) -> Result<Zeroizing<String>> {
    if let Ok(magic) = std::env::var(MAGIC_ENV_VAR) {
        if !magic.is_empty() {
            return Ok(Zeroizing::new(magic));
        }
    }

    let magic = dialoguer::Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("magic number prompt: {e}")))?;
    Ok(Zeroizing::new(magic))
}

/// Trim a service name typed on the command line and reject blanks.
pub fn service_arg(service: &str) -> Result<&str> {
    let trimmed = service.trim();
    if trimmed.is_empty() {
        return Err(PassVaultError::Validation(
            "Please provide a service name".into(),
        ));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn service_arg_trims_whitespace() {
        assert_eq!(service_arg("  github ").unwrap(), "github");
    }

    #[test]
    fn service_arg_rejects_blank() {
        assert!(service_arg("").is_err());
        assert!(service_arg("   ").is_err());
    }

    #[test]
    fn add_parses_account_flag() {
        let cli = Cli::parse_from(["passvault", "add", "github", "-a", "alice"]);
        match cli.command {
            Commands::Add { service, account } => {
                assert_eq!(service, "github");
                assert_eq!(account.as_deref(), Some("alice"));
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn add_rejects_password_on_command_line() {
        let result = Cli::try_parse_from(["passvault", "add", "github", "-a", "alice", "p@ss"]);
        assert!(result.is_err());
    }

    #[test]
    fn vault_dir_is_global() {
        let cli = Cli::parse_from(["passvault", "list", "--vault-dir", "/tmp/v"]);
        assert_eq!(cli.vault_dir.as_deref(), Some("/tmp/v"));
    }
}
