//! `passvault unlock` — open the vault, or create it when there is none.
//!
//! A missing or blank dump file starts a new vault; anything else must
//! load under the given password.

use std::path::PathBuf;

use crate::cli::output;
use crate::cli::{persist, prompt_new_password, prompt_password, settings, vault_path, Cli};
use crate::errors::Result;
use crate::vault::{read_dump, StoredDump, Vault};

/// Open or create the vault for this invocation.
///
/// Returns the dump path, the unlocked vault and whether it was created.
pub fn unlock_or_init(cli: &Cli) -> Result<(PathBuf, Vault, bool)> {
    let settings = settings(cli)?;
    let path = vault_path(cli, &settings)?;

    match read_dump(&path)? {
        StoredDump::Present(representation) => {
            let password = prompt_password()?;
            let vault = Vault::load(password.as_bytes(), &representation)?;
            Ok((path, vault, false))
        }
        StoredDump::Missing | StoredDump::Empty => {
            tracing::info!(path = %path.display(), "no vault data, creating a new vault");
            let password = prompt_new_password()?;
            let vault = Vault::init_with_params(password.as_bytes(), &settings.kdf_params())?;
            persist(&path, &vault)?;
            Ok((path, vault, true))
        }
    }
}

/// Execute the `unlock` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (path, vault, created) = unlock_or_init(cli)?;

    if created {
        output::success(&format!("Vault created at {}", path.display()));
    } else {
        output::success(&format!(
            "Vault unlocked ({} password(s) stored)",
            vault.len()
        ));
    }

    Ok(())
}
