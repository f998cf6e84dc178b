//! `passvault init` — create a new, empty vault file.

use crate::cli::output;
use crate::cli::{persist, prompt_new_password, settings, vault_path, Cli};
use crate::errors::{PassVaultError, Result};
use crate::vault::{read_dump, StoredDump, Vault};

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = settings(cli)?;
    let path = vault_path(cli, &settings)?;

    // 1. Refuse to clobber a vault that already holds data.
    if let StoredDump::Present(_) = read_dump(&path)? {
        output::tip("Use `passvault set` to add passwords to the existing vault.");
        return Err(PassVaultError::VaultAlreadyExists(path));
    }

    // 2. Choose the master password and derive the key.
    let password = prompt_new_password()?;
    let vault = Vault::init_with_params(password.as_bytes(), &settings.kdf_params())?;

    // 3. Write the empty vault.
    let dump = persist(&path, &vault)?;

    output::success(&format!("Vault created at {}", path.display()));
    output::info(&format!("Checksum: {}", dump.checksum));
    output::tip("Run `passvault set <DOMAIN>` to add a password.");
    output::tip("Run `passvault list` to see stored domains.");

    Ok(())
}
