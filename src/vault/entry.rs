//! The per-domain record stored inside a vault.
//!
//! Byte fields are kept as the base64 text found in the dump and are only
//! decoded when the entry is used.  A damaged field therefore affects only
//! its own entry, and only when that entry is read.  Every field is still
//! required on deserialization, so an entry can never be missing its IV,
//! ciphertext or tag.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::errors::{PassVaultError, Result};

/// AES-GCM output for one secret: the IV and the ciphertext (tag included).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedData {
    pub iv: String,
    pub data: String,
}

/// One encrypted secret plus its plaintext HMAC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "encryptedData")]
    pub encrypted_data: EncryptedData,

    pub hmac: String,
}

impl Entry {
    /// Build an entry from raw bytes, encoding each field.
    pub fn new(iv: &[u8], data: &[u8], hmac: &[u8]) -> Self {
        Self {
            encrypted_data: EncryptedData {
                iv: BASE64.encode(iv),
                data: BASE64.encode(data),
            },
            hmac: BASE64.encode(hmac),
        }
    }

    /// The decoded IV.  Undecodable text is `DecryptionFailed`.
    pub fn iv_bytes(&self) -> Result<Vec<u8>> {
        BASE64
            .decode(&self.encrypted_data.iv)
            .map_err(|_| PassVaultError::DecryptionFailed)
    }

    /// The decoded ciphertext.  Undecodable text is `DecryptionFailed`.
    pub fn data_bytes(&self) -> Result<Vec<u8>> {
        BASE64
            .decode(&self.encrypted_data.data)
            .map_err(|_| PassVaultError::DecryptionFailed)
    }

    /// The decoded HMAC tag.  Undecodable text is `IntegrityCheckFailed`.
    pub fn hmac_bytes(&self) -> Result<Vec<u8>> {
        BASE64
            .decode(&self.hmac)
            .map_err(|_| PassVaultError::IntegrityCheckFailed)
    }
}
