//! Per-entry HMAC tags and the whole-dump checksum.
//!
//! Every entry carries `HMAC-SHA256(hmac_key, plaintext)` next to its
//! ciphertext, so a record that decrypts under the vault key but was not
//! written by it (substituted or re-encrypted) is still rejected.
//!
//! The dump checksum is a plain SHA-256 over the rendered text, returned
//! to the caller as a receipt.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::errors::{PassVaultError, Result};

/// Size of an HMAC-SHA256 tag in bytes.
pub const HMAC_LEN: usize = 32;

/// Compute HMAC-SHA256 over a plaintext secret.
pub fn compute_hmac(hmac_key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let mut mac = Hmac::<Sha256>::new_from_slice(hmac_key)
        .map_err(|e| PassVaultError::KeyDerivationFailed(format!("invalid HMAC key: {e}")))?;

    mac.update(plaintext);

    Ok(mac.finalize().into_bytes().to_vec())
}

/// Verify a stored tag in constant time.
pub fn verify_hmac(hmac_key: &[u8], plaintext: &[u8], expected: &[u8]) -> Result<()> {
    let mut mac = Hmac::<Sha256>::new_from_slice(hmac_key)
        .map_err(|e| PassVaultError::KeyDerivationFailed(format!("invalid HMAC key: {e}")))?;

    mac.update(plaintext);

    mac.verify_slice(expected)
        .map_err(|_| PassVaultError::IntegrityCheckFailed)
}

/// Lowercase hex SHA-256 of a rendered dump.
pub fn checksum(text: &str) -> String {
    Sha256::digest(text.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Compare a dump against a previously issued checksum receipt.
///
/// Case-insensitive on the receipt, constant-time on the comparison.
pub fn verify_checksum(text: &str, expected: &str) -> Result<()> {
    let actual = checksum(text);
    let expected = expected.trim().to_ascii_lowercase();

    if actual.as_bytes().ct_eq(expected.as_bytes()).into() {
        Ok(())
    } else {
        Err(PassVaultError::ChecksumMismatch)
    }
}
