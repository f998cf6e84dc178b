//! `passvault remove` — delete the password for a domain.

use crate::cli::output;
use crate::cli::{open_vault, persist, settings, vault_path, Cli};
use crate::errors::Result;

/// Execute the `remove` command.
///
/// A domain with no entry is not an error; the file is only rewritten
/// when something was actually removed.
pub fn execute(cli: &Cli, domain: &str) -> Result<()> {
    let settings = settings(cli)?;
    let path = vault_path(cli, &settings)?;
    let mut vault = open_vault(&path)?;

    if vault.remove(domain) {
        persist(&path, &vault)?;
        output::success(&format!("Password for {domain} removed"));
    } else {
        output::info(&format!("No password found for {domain}."));
    }

    Ok(())
}
