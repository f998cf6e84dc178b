//! An explicit unlock session that callers pass around instead of a
//! process-wide vault variable.
//!
//! The session starts locked.  `init` or `load` unlock it; every vault
//! operation on a locked session fails with `MasterKeyNotInitialized`.
//! A failed `load` leaves the session exactly as it was.

use crate::errors::{PassVaultError, Result};

use super::format::Dump;
use super::store::Vault;

#[derive(Debug, Default)]
pub struct Session {
    vault: Option<Vault>,
}

impl Session {
    /// A locked session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unlock with a brand-new empty vault.
    pub fn init(&mut self, password: &[u8]) -> Result<&mut Vault> {
        let vault = Vault::init(password)?;
        Ok(self.vault.insert(vault))
    }

    /// Unlock with a vault restored from `representation`.
    pub fn load(&mut self, password: &[u8], representation: &str) -> Result<&mut Vault> {
        let vault = Vault::load(password, representation)?;
        Ok(self.vault.insert(vault))
    }

    /// Unlock with an already constructed vault.
    pub fn attach(&mut self, vault: Vault) -> &mut Vault {
        self.vault.insert(vault)
    }

    /// Drop the vault and its key.
    pub fn lock(&mut self) {
        if self.vault.take().is_some() {
            tracing::debug!("session locked");
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.vault.is_some()
    }

    pub fn vault(&self) -> Result<&Vault> {
        self.vault
            .as_ref()
            .ok_or(PassVaultError::MasterKeyNotInitialized)
    }

    pub fn vault_mut(&mut self) -> Result<&mut Vault> {
        self.vault
            .as_mut()
            .ok_or(PassVaultError::MasterKeyNotInitialized)
    }

    pub fn get(&self, domain: &str) -> Result<Option<String>> {
        self.vault()?.get(domain)
    }

    pub fn set(&mut self, domain: &str, secret: &str) -> Result<()> {
        self.vault_mut()?.set(domain, secret)
    }

    pub fn remove(&mut self, domain: &str) -> Result<bool> {
        Ok(self.vault_mut()?.remove(domain))
    }

    pub fn dump(&self) -> Result<Dump> {
        self.vault()?.dump()
    }
}
