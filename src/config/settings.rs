use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::{KdfParams, DEFAULT_ITERATIONS, MAX_ITERATIONS, MIN_ITERATIONS};
use crate::errors::{PassVaultError, Result};

/// Project-level configuration, loaded from `.passvault.toml`.
///
/// Every field has a default so PassVault works without any config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Path of the dump file, relative to the config directory unless
    /// absolute.
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// PBKDF2 iterations used when creating a new vault.
    #[serde(default = "default_pbkdf2_iterations")]
    pub pbkdf2_iterations: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_file() -> String {
    "password_dump.json".to_string()
}

fn default_pbkdf2_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_file: default_vault_file(),
            pbkdf2_iterations: default_pbkdf2_iterations(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for.
    pub const FILE_NAME: &'static str = ".passvault.toml";

    /// Load settings from `<dir>/.passvault.toml`.
    ///
    /// A missing file yields defaults; a file that cannot be parsed or
    /// whose PBKDF2 iteration count is out of range is an error.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&settings.pbkdf2_iterations) {
            return Err(PassVaultError::ConfigError(format!(
                "pbkdf2_iterations must be between {MIN_ITERATIONS} and {MAX_ITERATIONS} (got {})",
                settings.pbkdf2_iterations
            )));
        }

        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(settings)
    }

    /// Resolve the dump file path against `dir`.
    pub fn vault_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.vault_file)
    }

    /// PBKDF2 parameters for new vaults.
    pub fn kdf_params(&self) -> KdfParams {
        KdfParams {
            iterations: self.pbkdf2_iterations,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
