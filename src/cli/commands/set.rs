//! `passvault set` — add or overwrite the password for a domain.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_vault, persist, settings, vault_path, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `set` command.
pub fn execute(cli: &Cli, domain: &str, secret: Option<&str>) -> Result<()> {
    let settings = settings(cli)?;
    let path = vault_path(cli, &settings)?;

    // Determine the password from one of three sources.
    let secret = Zeroizing::new(if let Some(s) = secret {
        // Source 1: Inline value on the command line.
        output::warning("Password provided on command line — it may appear in shell history.");
        s.to_string()
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input.
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf.trim_end_matches(['\r', '\n']).to_string()
    } else {
        // Source 3: Interactive hidden prompt.
        dialoguer::Password::new()
            .with_prompt(format!("Enter password for {domain}"))
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("input prompt: {e}")))?
    });

    if secret.is_empty() {
        return Err(PassVaultError::CommandFailed(format!(
            "no password given for {domain}"
        )));
    }

    let mut vault = open_vault(&path)?;
    let existed = vault.contains(domain);
    vault.set(domain, &secret)?;
    persist(&path, &vault)?;

    let verb = if existed { "updated" } else { "added" };
    output::success(&format!(
        "Password for {domain} {verb} ({} total)",
        vault.len()
    ));

    Ok(())
}
