//! AES-256-GCM authenticated encryption of single records.
//!
//! Each call to `encrypt` generates a fresh random 12-byte IV and returns
//! it next to the ciphertext; the vault stores both fields separately.
//! The ciphertext carries the 16-byte GCM tag at its end.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use crate::errors::{PassVaultError, Result};

/// Size of the AES-256-GCM IV in bytes.
pub const IV_LEN: usize = 12;

/// Size of the GCM authentication tag appended to every ciphertext.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns `(iv, ciphertext)`.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<([u8; IV_LEN], Vec<u8>)> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| PassVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| PassVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut iv = [0u8; IV_LEN];
    iv.copy_from_slice(&nonce);
    Ok((iv, ciphertext))
}

/// Decrypt a ciphertext produced by `encrypt`.
///
/// Every failure (bad IV length, wrong key, tampered bytes) is reported as
/// `DecryptionFailed` and no plaintext is returned.
pub fn decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    if iv.len() != IV_LEN || ciphertext.len() < TAG_LEN {
        return Err(PassVaultError::DecryptionFailed);
    }

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| PassVaultError::DecryptionFailed)?;

    cipher
        .decrypt(Nonce::from_slice(iv), ciphertext)
        .map_err(|_| PassVaultError::DecryptionFailed)
}
