//! `passvault list` — show the stored domains.

use crate::cli::output;
use crate::cli::{open_vault, settings, vault_path, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = settings(cli)?;
    let path = vault_path(cli, &settings)?;
    let vault = open_vault(&path)?;

    let domains = vault.domains();
    output::info(&format!("{} password(s) stored", domains.len()));
    output::print_domains_table(&domains);

    Ok(())
}
