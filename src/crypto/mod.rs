//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 password-based key derivation (`kdf`)
//! - HKDF record/HMAC sub-key derivation (`keys`)
//! - AES-256-GCM record encryption and decryption (`encryption`)
//! - Per-entry HMAC tags and the dump checksum (`integrity`)

pub mod encryption;
pub mod integrity;
pub mod kdf;
pub mod keys;

pub use encryption::{decrypt, encrypt};
pub use integrity::{checksum, compute_hmac, verify_checksum, verify_hmac};
pub use kdf::{derive_master_key, derive_master_key_with_params, generate_salt, KdfParams};
pub use keys::{derive_hmac_key, derive_record_key, MasterKey};
