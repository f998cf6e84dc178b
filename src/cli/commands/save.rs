//! `passvault save` — rewrite the vault file and print its checksum.

use crate::cli::output;
use crate::cli::{open_vault, persist, settings, vault_path, Cli};
use crate::errors::Result;

/// Execute the `save` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = settings(cli)?;
    let path = vault_path(cli, &settings)?;
    let vault = open_vault(&path)?;

    let dump = persist(&path, &vault)?;

    output::success(&format!("Vault saved to {}", path.display()));
    println!("{}", dump.checksum);
    output::tip("Keep this checksum; `passvault verify <CHECKSUM>` compares the file against it.");

    Ok(())
}
