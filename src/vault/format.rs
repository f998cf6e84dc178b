//! Textual vault dump format and its checksum.
//!
//! A dump is pretty-printed JSON:
//!
//! ```text
//! {
//!   "kvs": {
//!     "<domain>": {
//!       "encryptedData": { "iv": "<base64>", "data": "<base64>" },
//!       "hmac": "<base64>"
//!     }
//!   },
//!   "salt": "<base64>"
//! }
//! ```
//!
//! An optional `"iterations"` field is written only when the vault was
//! created with a non-default PBKDF2 iteration count.  Nothing
//! authenticates it, so `deserialize` only accepts values in
//! `MIN_ITERATIONS..=MAX_ITERATIONS`.
//!
//! Entry fields are not decoded here; a damaged entry surfaces when it is
//! read.
//!
//! `serialize` also returns the SHA-256 checksum of the rendered text.
//! The checksum is a receipt for the caller and is not part of the dump.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entry::Entry;
use crate::crypto::integrity;
use crate::crypto::kdf::{KdfParams, DEFAULT_ITERATIONS, MAX_ITERATIONS, MIN_ITERATIONS};
use crate::errors::{PassVaultError, Result};

/// A rendered vault and the checksum of that exact text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dump {
    pub representation: String,
    pub checksum: String,
}

/// Everything a dump carries. No key material.
#[derive(Debug, Clone)]
pub struct VaultContents {
    pub salt: Vec<u8>,
    pub entries: BTreeMap<String, Entry>,
    pub kdf_params: KdfParams,
}

#[derive(Serialize)]
struct DumpOut<'a> {
    kvs: &'a BTreeMap<String, Entry>,
    #[serde(serialize_with = "base64_encode")]
    salt: &'a [u8],
    #[serde(skip_serializing_if = "Option::is_none")]
    iterations: Option<u32>,
}

#[derive(Deserialize)]
struct DumpIn {
    #[serde(default)]
    kvs: Option<BTreeMap<String, Entry>>,
    #[serde(default)]
    salt: Option<String>,
    #[serde(default)]
    iterations: Option<u32>,
}

/// Render a vault into its dump text and checksum.
pub fn serialize(
    salt: &[u8],
    entries: &BTreeMap<String, Entry>,
    kdf_params: &KdfParams,
) -> Result<Dump> {
    let out = DumpOut {
        kvs: entries,
        salt,
        iterations: (kdf_params.iterations != DEFAULT_ITERATIONS).then_some(kdf_params.iterations),
    };

    let representation = serde_json::to_string_pretty(&out)
        .map_err(|e| PassVaultError::SerializationError(format!("vault dump: {e}")))?;
    let checksum = integrity::checksum(&representation);

    Ok(Dump {
        representation,
        checksum,
    })
}

/// Parse dump text back into its parts.
///
/// Does not check passwords or tags; that happens in `Vault::load`.
pub fn deserialize(representation: &str) -> Result<VaultContents> {
    let raw: DumpIn = serde_json::from_str(representation)
        .map_err(|e| PassVaultError::MalformedDump(e.to_string()))?;

    let salt = match raw.salt.as_deref() {
        None | Some("") => return Err(PassVaultError::MissingSalt),
        Some(encoded) => BASE64
            .decode(encoded)
            .map_err(|e| PassVaultError::MalformedDump(format!("salt: {e}")))?,
    };

    let iterations = raw.iterations.unwrap_or(DEFAULT_ITERATIONS);
    if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&iterations) {
        return Err(PassVaultError::MalformedDump(format!(
            "iterations must be between {MIN_ITERATIONS} and {MAX_ITERATIONS} (got {iterations})"
        )));
    }

    Ok(VaultContents {
        salt,
        entries: raw.kvs.unwrap_or_default(),
        kdf_params: KdfParams { iterations },
    })
}

// ---------------------------------------------------------------------------
// Serde helper for the base64-encoded salt
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}
