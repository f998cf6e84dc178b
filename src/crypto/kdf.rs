//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The iteration count defaults to 100 000 and is configurable through
//! `KdfParams` (loaded from `.passvault.toml`).  A wrong password is never
//! an error here: it simply yields a different key, which the vault
//! detects later when an entry fails to decrypt.

use hmac::Hmac;
use rand::RngCore;
use sha2::Sha256;

use crate::errors::{PassVaultError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Default PBKDF2 iteration count.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Minimum accepted iteration count.
pub const MIN_ITERATIONS: u32 = 1_000;

/// Largest iteration count a dump or config may ask for.
pub const MAX_ITERATIONS: u32 = 10 * DEFAULT_ITERATIONS;

/// Configurable PBKDF2 parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Number of PBKDF2 rounds (default: 100 000).
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// Derive a 32-byte master key from a password and salt with the default
/// iteration count.
pub fn derive_master_key(password: &[u8], salt: &[u8]) -> Result<[u8; KEY_LEN]> {
    derive_master_key_with_params(password, salt, &KdfParams::default())
}

/// Derive a 32-byte master key with explicit PBKDF2 parameters.
///
/// The same password + salt + params will always produce the same key.
pub fn derive_master_key_with_params(
    password: &[u8],
    salt: &[u8],
    params: &KdfParams,
) -> Result<[u8; KEY_LEN]> {
    if params.iterations < MIN_ITERATIONS {
        return Err(PassVaultError::KeyDerivationFailed(format!(
            "PBKDF2 iterations must be at least {MIN_ITERATIONS} (got {})",
            params.iterations
        )));
    }

    let mut key = [0u8; KEY_LEN];
    pbkdf2::pbkdf2::<Hmac<Sha256>>(password, salt, params.iterations, &mut key)
        .map_err(|e| PassVaultError::KeyDerivationFailed(format!("PBKDF2 failed: {e}")))?;

    tracing::debug!(iterations = params.iterations, "derived master key");
    Ok(key)
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}
