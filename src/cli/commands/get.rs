//! `passvault get` — print or copy the password for a domain.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_vault, settings, vault_path, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `get` command.
pub fn execute(cli: &Cli, domain: &str, copy: bool) -> Result<()> {
    let settings = settings(cli)?;
    let path = vault_path(cli, &settings)?;
    let vault = open_vault(&path)?;

    let Some(secret) = vault.get(domain)? else {
        output::info(&format!("No password found for {domain}."));
        return Ok(());
    };
    let secret = Zeroizing::new(secret);

    if copy {
        arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(secret.as_str()))
            .map_err(|e| PassVaultError::CommandFailed(format!("clipboard: {e}")))?;
        output::success(&format!("Password for {domain} copied to clipboard"));
    } else {
        println!("{}", secret.as_str());
    }

    Ok(())
}
