use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::backup::RetryPolicy;
use crate::errors::{VaultError, Result};

/// Application configuration, loaded from `.secretvault.toml`.
///
/// Every field has a sensible default so SecretVault works out-of-the-box
/// without any config file at all.  KDF parameters are fixed by the vault
/// format and are not configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Path of the encrypted vault file (relative to the working directory).
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// Minimum master password length accepted by `init`.
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,

    /// Length of passwords produced by `generate` and `--generate-password`.
    #[serde(default = "default_generated_password_len")]
    pub generated_password_len: usize,

    /// Directory that receives a backup copy after every save.
    /// Backups are disabled when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<String>,

    /// File name of the backup copy inside `backup_dir`.
    #[serde(default = "default_backup_file_name")]
    pub backup_file_name: String,

    /// Upload attempts per save before giving up.
    #[serde(default = "default_backup_max_attempts")]
    pub backup_max_attempts: u32,

    /// Delay before the first upload retry, in milliseconds.
    #[serde(default = "default_backup_initial_delay_ms")]
    pub backup_initial_delay_ms: u64,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_file() -> String {
    "vault.enc".to_string()
}

fn default_min_password_len() -> usize {
    8
}

fn default_generated_password_len() -> usize {
    crate::crypto::generator::DEFAULT_LENGTH
}

fn default_backup_file_name() -> String {
    "vault.enc".to_string()
}

fn default_backup_max_attempts() -> u32 {
    3
}

fn default_backup_initial_delay_ms() -> u64 {
    500
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_file: default_vault_file(),
            min_password_len: default_min_password_len(),
            generated_password_len: default_generated_password_len(),
            backup_dir: None,
            backup_file_name: default_backup_file_name(),
            backup_max_attempts: default_backup_max_attempts(),
            backup_initial_delay_ms: default_backup_initial_delay_ms(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    pub const FILE_NAME: &'static str = ".secretvault.toml";

    /// Load settings from `<dir>/.secretvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::load_file(&config_path)
    }

    /// Load settings from an explicit file, which must exist.
    pub fn load_file(config_path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(config_path).map_err(|e| {
            VaultError::ConfigError(format!("Failed to read {}: {e}", config_path.display()))
        })?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.vault_file.trim().is_empty() {
            return Err(VaultError::ConfigError("vault_file cannot be empty".into()));
        }
        if self.min_password_len == 0 {
            return Err(VaultError::ConfigError(
                "min_password_len must be at least 1".into(),
            ));
        }
        if self.generated_password_len == 0 {
            return Err(VaultError::ConfigError(
                "generated_password_len must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Resolve the vault file against `base_dir` (absolute paths win).
    pub fn vault_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.vault_file)
    }

    /// Resolve the backup directory against `base_dir`, if backups are on.
    pub fn backup_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.backup_dir.as_ref().map(|dir| base_dir.join(dir))
    }

    /// Convert the backup settings into a retry policy.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.backup_max_attempts,
            initial_delay: Duration::from_millis(self.backup_initial_delay_ms),
            ..RetryPolicy::default()
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
