//! The vault envelope: the only artifact that is ever persisted.
//!
//! ```text
//! [salt: 16 bytes][nonce: 12 bytes][AES-256-GCM ciphertext + 16-byte tag]
//! ```
//!
//! - **Salt**: fresh per save, fed to Argon2id with the master password.
//! - **Nonce**: fresh per save, used once under the derived key.
//! - **Ciphertext**: the UTF-8 JSON of the `Vault`, no associated data.
//!
//! There is no magic, no header and no stored KDF parameters; the format
//! version lives inside the encrypted JSON.

use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::encryption::{self, NONCE_LEN};
use crate::crypto::kdf::{derive_key_with_params, generate_salt, KdfParams, SALT_LEN};
use crate::errors::{VaultError, Result};

use super::model::{Vault, FORMAT_VERSION};

/// Bytes before the ciphertext: salt + nonce.
pub const ENVELOPE_HEADER_LEN: usize = SALT_LEN + NONCE_LEN;

/// Immutable codec configuration.
///
/// `Default` is the production configuration; the KDF parameters are part
/// of the on-disk format and must not change for existing vaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecConfig {
    pub kdf: KdfParams,
}

/// Seals a `Vault` into an envelope and opens it again.
///
/// Stateless after construction, so one codec can be shared freely
/// between threads.
#[derive(Debug, Clone, Default)]
pub struct VaultCodec {
    config: CodecConfig,
}

impl VaultCodec {
    /// Build a codec, rejecting weak KDF parameters up front.
    pub fn new(config: CodecConfig) -> Result<Self> {
        config.kdf.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Serialize and encrypt `vault` under `password`.
    ///
    /// Returns `salt || nonce || ciphertext`.  Salt and nonce are new on
    /// every call.
    pub fn encrypt(&self, vault: &Vault, password: &str) -> Result<Vec<u8>> {
        // 1. Fresh salt (the nonce is generated by the AEAD layer).
        let salt = generate_salt();

        // 2. Derive the key.
        let key = derive_key_with_params(password.as_bytes(), &salt, &self.config.kdf)?;

        // 3. Serialize into a buffer that is wiped after use.
        let plaintext = Zeroizing::new(
            serde_json::to_vec(vault)
                .map_err(|e| VaultError::SerializationError(format!("vault: {e}")))?,
        );

        // 4. Encrypt: yields nonce || ciphertext + tag.
        let sealed = encryption::encrypt(&key, &plaintext)?;

        // 5. Prepend the salt.
        let mut envelope = Vec::with_capacity(SALT_LEN + sealed.len());
        envelope.extend_from_slice(&salt);
        envelope.extend_from_slice(&sealed);

        debug!(
            entries = vault.entries.len(),
            envelope_len = envelope.len(),
            "sealed vault envelope"
        );
        Ok(envelope)
    }

    /// Authenticate and decrypt an envelope.
    ///
    /// Wrong password, modified bytes, truncation, and a plaintext that is
    /// not a supported vault all yield the same `DecryptFailure`.  The
    /// reason is only recorded as a debug event.  `ResourceExhaustion` is
    /// the one other possible error.
    pub fn decrypt(&self, envelope: &[u8], password: &str) -> Result<Vault> {
        // 1. Too short to hold salt + nonce: stop before the KDF runs.
        if envelope.len() < ENVELOPE_HEADER_LEN {
            debug!(len = envelope.len(), "envelope shorter than salt + nonce");
            return Err(VaultError::DecryptFailure);
        }

        // 2. Split salt from the nonce-prefixed ciphertext.
        let (salt_bytes, sealed) = envelope.split_at(SALT_LEN);
        let salt: [u8; SALT_LEN] = salt_bytes
            .try_into()
            .map_err(|_| VaultError::DecryptFailure)?;

        // 3. Derive the key from the stored salt.
        let key = derive_key_with_params(password.as_bytes(), &salt, &self.config.kdf)?;

        // 4. Authenticated decryption.
        let plaintext = Zeroizing::new(
            encryption::decrypt(&key, sealed)
                .inspect_err(|_| debug!("authentication tag check failed"))?,
        );

        // 5. Parse; anything structurally off is the same failure.
        let vault: Vault = serde_json::from_slice(&plaintext).map_err(|e| {
            debug!(
                line = e.line(),
                column = e.column(),
                "authenticated plaintext is not a vault"
            );
            VaultError::DecryptFailure
        })?;

        if vault.version != FORMAT_VERSION {
            debug!(version = vault.version, "unsupported vault format version");
            return Err(VaultError::DecryptFailure);
        }

        Ok(vault)
    }
}
