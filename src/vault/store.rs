//! The unlocked vault: domain → encrypted entry, plus the session key.
//!
//! A `Vault` only exists in the unlocked state.  It is built by
//! `Vault::init` (fresh salt, empty map) or `Vault::load` (salt from a
//! dump, password checked against one stored entry), and it never writes
//! anything itself; `dump` hands the rendered text back to the caller.

use std::collections::BTreeMap;

use zeroize::Zeroize;

use crate::crypto::encryption::{decrypt, encrypt};
use crate::crypto::integrity::{compute_hmac, verify_hmac};
use crate::crypto::kdf::{derive_master_key_with_params, generate_salt, KdfParams};
use crate::crypto::keys::MasterKey;
use crate::errors::{PassVaultError, Result};

use super::entry::Entry;
use super::format::{self, Dump};

/// An unlocked password vault.
pub struct Vault {
    /// KDF salt, fixed for the life of the vault.
    salt: Vec<u8>,

    /// PBKDF2 parameters the master key was derived with.
    kdf_params: KdfParams,

    /// Domain name -> encrypted entry.
    entries: BTreeMap<String, Entry>,

    /// The derived master key (zeroized on drop).
    master_key: MasterKey,
}

impl Vault {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create an empty vault protected by `password`, using the default
    /// PBKDF2 parameters.
    pub fn init(password: &[u8]) -> Result<Self> {
        Self::init_with_params(password, &KdfParams::default())
    }

    /// Create an empty vault with explicit PBKDF2 parameters.
    pub fn init_with_params(password: &[u8], kdf_params: &KdfParams) -> Result<Self> {
        let salt = generate_salt().to_vec();
        let master_key = Self::unlock_key(password, &salt, kdf_params)?;

        tracing::info!(iterations = kdf_params.iterations, "initialised new vault");

        Ok(Self {
            salt,
            kdf_params: *kdf_params,
            entries: BTreeMap::new(),
            master_key,
        })
    }

    /// Rebuild a vault from a dump and check `password` against it.
    ///
    /// If the vault holds at least one entry, the first domain is
    /// decrypted and verified as a probe; any failure there is reported
    /// as `InvalidMasterPassword`.  An empty vault has nothing to probe,
    /// so it opens under any password.
    pub fn load(password: &[u8], representation: &str) -> Result<Self> {
        let contents = format::deserialize(representation)?;
        let master_key = Self::unlock_key(password, &contents.salt, &contents.kdf_params)?;

        let vault = Self {
            salt: contents.salt,
            kdf_params: contents.kdf_params,
            entries: contents.entries,
            master_key,
        };

        if let Some(probe) = vault.entries.keys().next() {
            if let Err(e) = vault.get(probe) {
                tracing::debug!(error = %e, "password probe failed");
                return Err(PassVaultError::InvalidMasterPassword);
            }
        }

        tracing::info!(entries = vault.entries.len(), "loaded vault");
        Ok(vault)
    }

    fn unlock_key(password: &[u8], salt: &[u8], kdf_params: &KdfParams) -> Result<MasterKey> {
        let mut master_bytes = derive_master_key_with_params(password, salt, kdf_params)?;
        let master_key = MasterKey::new(master_bytes);
        master_bytes.zeroize();
        Ok(master_key)
    }

    // ------------------------------------------------------------------
    // Record operations
    // ------------------------------------------------------------------

    /// Decrypt and verify the secret stored for `domain`.
    ///
    /// Returns `Ok(None)` when the domain has no entry.  A tampered or
    /// undecodable IV or ciphertext is `DecryptionFailed`; a ciphertext
    /// that decrypts but whose HMAC is undecodable or does not match is
    /// `IntegrityCheckFailed`.
    pub fn get(&self, domain: &str) -> Result<Option<String>> {
        let Some(entry) = self.entries.get(domain) else {
            return Ok(None);
        };

        let iv = entry.iv_bytes()?;
        let ciphertext = entry.data_bytes()?;

        let mut record_key = self.master_key.derive_record_key()?;
        let plaintext = decrypt(&record_key, &iv, &ciphertext);
        record_key.zeroize();
        let mut plaintext = plaintext?;

        let mut hmac_key = self.master_key.derive_hmac_key()?;
        let verified = entry
            .hmac_bytes()
            .and_then(|tag| verify_hmac(&hmac_key, &plaintext, &tag));
        hmac_key.zeroize();

        if let Err(e) = verified {
            plaintext.zeroize();
            tracing::warn!(domain, "entry failed HMAC verification");
            return Err(e);
        }

        String::from_utf8(plaintext).map(Some).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            PassVaultError::DecryptionFailed
        })
    }

    /// Encrypt `secret` under a fresh IV and store it for `domain`,
    /// replacing any previous entry.
    pub fn set(&mut self, domain: &str, secret: &str) -> Result<()> {
        let mut record_key = self.master_key.derive_record_key()?;
        let encrypted = encrypt(&record_key, secret.as_bytes());
        record_key.zeroize();
        let (iv, data) = encrypted?;

        let mut hmac_key = self.master_key.derive_hmac_key()?;
        let hmac = compute_hmac(&hmac_key, secret.as_bytes());
        hmac_key.zeroize();

        let entry = Entry::new(&iv, &data, &hmac?);

        let replaced = self.entries.insert(domain.to_string(), entry).is_some();
        tracing::debug!(domain, replaced, "stored entry");
        Ok(())
    }

    /// Delete the entry for `domain`.  Returns whether it existed.
    pub fn remove(&mut self, domain: &str) -> bool {
        let existed = self.entries.remove(domain).is_some();
        tracing::debug!(domain, existed, "remove entry");
        existed
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Render the vault (entries + salt, never the key) and its checksum.
    pub fn dump(&self) -> Result<Dump> {
        format::serialize(&self.salt, &self.entries, &self.kdf_params)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// All domain names, sorted.
    pub fn domains(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Returns `true` if the vault has an entry for `domain`.
    ///
    /// No decryption is performed.
    pub fn contains(&self, domain: &str) -> bool {
        self.entries.contains_key(domain)
    }

    /// The raw stored entry for `domain`, if any.
    pub fn entry(&self, domain: &str) -> Option<&Entry> {
        self.entries.get(domain)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn kdf_params(&self) -> KdfParams {
        self.kdf_params
    }
}

impl std::fmt::Debug for Vault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("entries", &self.entries.len())
            .field("kdf_params", &self.kdf_params)
            .field("master_key", &self.master_key)
            .finish_non_exhaustive()
    }
}
