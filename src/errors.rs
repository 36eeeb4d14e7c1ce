use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in SecretVault.
///
/// Messages never carry key material, passwords, or plaintext.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Crypto errors ---
    /// Wrong password, tampered or truncated envelope, or a plaintext that
    /// does not describe a vault.  Callers cannot tell these apart.
    #[error("Invalid password or corrupted vault")]
    DecryptFailure,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation could not complete: {0}")]
    ResourceExhaustion(String),

    // --- Vault errors ---
    #[error("Vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("Entry '{0}' not found")]
    EntryNotFound(String),

    #[error("Unknown entry type '{0}'")]
    InvalidEntryType(String),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    // --- Backup errors ---
    #[error("Backup failed: {0}")]
    BackupFailed(String),

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
    #[error("Clipboard error: {0}")]
    ClipboardError(String),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Password mismatch: passwords do not match")]
    PasswordMismatch,
}

/// Convenience type alias for SecretVault results.
pub type Result<T> = std::result::Result<T, VaultError>;
