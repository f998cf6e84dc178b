//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{PassVaultError, Result};
use crate::vault::{read_dump, write_dump, Dump, StoredDump, Vault};

/// Minimum length for a newly chosen master password.
const MIN_PASSWORD_LEN: usize = 8;

/// Environment variable consulted before prompting for the master password.
pub const PASSWORD_ENV: &str = "PASSVAULT_PASSWORD";

/// PassVault CLI: encrypted per-domain password vault.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Encrypted per-domain password vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault dump file (default: vault_file from .passvault.toml)
    #[arg(short, long, global = true)]
    pub file: Option<String>,

    /// Directory containing .passvault.toml (default: current directory)
    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new, empty vault
    Init,

    /// Open the vault, creating it if the file is missing or empty
    Unlock,

    /// Store a password for a domain (add or overwrite)
    Set {
        /// Domain name (e.g. example.com)
        domain: String,
        /// Password (omit for interactive prompt)
        secret: Option<String>,
    },

    /// Retrieve the password for a domain
    Get {
        /// Domain name
        domain: String,
        /// Copy to the clipboard instead of printing
        #[arg(short, long)]
        copy: bool,
    },

    /// Remove the password for a domain
    Remove {
        /// Domain name
        domain: String,
    },

    /// List stored domains
    List,

    /// Rewrite the vault file and print its SHA-256 checksum
    Save,

    /// Check the vault file against a checksum printed by `save`
    Verify {
        /// Hex SHA-256 checksum
        checksum: String,
    },

    /// Interactive menu
    Menu,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the master password, trying `PASSVAULT_PASSWORD` first and then an
/// interactive prompt.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation.
///
/// Also respects `PASSVAULT_PASSWORD` for scripted usage and enforces a
/// minimum length.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        check_new_password(&pw)?;
        return Ok(pw);
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose master password")
            .with_confirmation(
                "Confirm master password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;

        if let Err(e) = check_new_password(&password) {
            output::warning(&format!("{e}. Try again."));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

fn password_from_env() -> Option<Zeroizing<String>> {
    match std::env::var(PASSWORD_ENV) {
        Ok(pw) if !pw.is_empty() => Some(Zeroizing::new(pw)),
        _ => None,
    }
}

fn check_new_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(PassVaultError::CommandFailed(format!(
            "master password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Directory that holds `.passvault.toml`.
pub fn config_dir(cli: &Cli) -> Result<PathBuf> {
    match &cli.config_dir {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => Ok(std::env::current_dir()?),
    }
}

/// Load the project settings for this invocation.
pub fn settings(cli: &Cli) -> Result<Settings> {
    Settings::load(&config_dir(cli)?)
}

/// Resolve the dump file path: `--file` wins over the config file.
pub fn vault_path(cli: &Cli, settings: &Settings) -> Result<PathBuf> {
    match &cli.file {
        Some(file) => Ok(PathBuf::from(file)),
        None => Ok(settings.vault_path(&config_dir(cli)?)),
    }
}

/// Read the dump at `path` and unlock it with a prompted password.
///
/// A missing or empty file is `VaultNotFound`.
pub fn open_vault(path: &Path) -> Result<Vault> {
    let representation = match read_dump(path)? {
        StoredDump::Present(text) => text,
        StoredDump::Missing | StoredDump::Empty => {
            output::tip("Run `passvault init` to create a vault.");
            return Err(PassVaultError::VaultNotFound(path.to_path_buf()));
        }
    };

    let password = prompt_password()?;
    Vault::load(password.as_bytes(), &representation)
}

/// Dump the vault and atomically replace the file at `path`.
pub fn persist(path: &Path, vault: &Vault) -> Result<Dump> {
    let dump = vault.dump()?;
    write_dump(path, &dump.representation)?;
    Ok(dump)
}
