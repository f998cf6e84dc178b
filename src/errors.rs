use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum PassVaultError {
    // --- Crypto errors ---
    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — entry was tampered with or encrypted under another key")]
    DecryptionFailed,

    #[error("Integrity check failed — stored HMAC does not match the decrypted secret")]
    IntegrityCheckFailed,

    #[error("Checksum mismatch — the vault dump differs from the receipt")]
    ChecksumMismatch,

    // --- Vault errors ---
    #[error("Invalid master password")]
    InvalidMasterPassword,

    #[error("Master key not initialised — run init or unlock first")]
    MasterKeyNotInitialized,

    #[error("Invalid password dump format: {0}")]
    MalformedDump(String),

    #[error("Invalid password dump: missing salt")]
    MissingSalt,

    #[error("Vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, PassVaultError>;
