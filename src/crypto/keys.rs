//! Subkey derivation using HKDF-SHA256.
//!
//! From the PBKDF2 master key we derive two independent sub-keys:
//! - a **record key** for AES-256-GCM encryption of every entry,
//! - an **HMAC key** for the per-entry plaintext authentication tag.
//!
//! Neither sub-key is ever used for the other purpose.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::errors::{PassVaultError, Result};

/// Length of derived sub-keys (256 bits).
const KEY_LEN: usize = 32;

const RECORD_KEY_INFO: &[u8] = b"passvault-record-key";
const HMAC_KEY_INFO: &[u8] = b"passvault-hmac-key";

/// Derive the AES-256-GCM record key from the master key.
pub fn derive_record_key(master_key: &[u8]) -> Result<[u8; KEY_LEN]> {
    hkdf_derive(master_key, RECORD_KEY_INFO)
}

/// Derive the per-entry HMAC key from the master key.
pub fn derive_hmac_key(master_key: &[u8]) -> Result<[u8; KEY_LEN]> {
    hkdf_derive(master_key, HMAC_KEY_INFO)
}

fn hkdf_derive(ikm: &[u8], info: &[u8]) -> Result<[u8; KEY_LEN]> {
    let hk = Hkdf::<Sha256>::new(None, ikm);

    let mut okm = [0u8; KEY_LEN];
    hk.expand(info, &mut okm)
        .map_err(|e| PassVaultError::KeyDerivationFailed(format!("HKDF expand failed: {e}")))?;

    Ok(okm)
}

/// A 32-byte master key that zeroes its memory when dropped.
///
/// Held by an unlocked vault for the lifetime of the session and never
/// serialized.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterKey {
    bytes: [u8; KEY_LEN],
}

impl MasterKey {
    /// Create a new `MasterKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// Derive the record encryption key from this master key.
    pub fn derive_record_key(&self) -> Result<[u8; KEY_LEN]> {
        derive_record_key(&self.bytes)
    }

    /// Derive the HMAC key from this master key.
    pub fn derive_hmac_key(&self) -> Result<[u8; KEY_LEN]> {
        derive_hmac_key(&self.bytes)
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
