//! `passvault verify` — compare the vault file with a checksum receipt.
//!
//! No password is needed: the checksum covers the dump text, not the
//! decrypted entries.

use crate::cli::output;
use crate::cli::{settings, vault_path, Cli};
use crate::crypto::verify_checksum;
use crate::errors::{PassVaultError, Result};
use crate::vault::{read_dump, StoredDump};

/// Execute the `verify` command.
pub fn execute(cli: &Cli, checksum: &str) -> Result<()> {
    let settings = settings(cli)?;
    let path = vault_path(cli, &settings)?;

    let StoredDump::Present(representation) = read_dump(&path)? else {
        return Err(PassVaultError::VaultNotFound(path));
    };

    verify_checksum(&representation, checksum)?;
    output::success(&format!("{} matches the checksum", path.display()));

    Ok(())
}
