//! Password-based key derivation using Argon2id.
//!
//! Argon2id is a memory-hard KDF that resists GPU/ASIC brute force and
//! side-channel attacks.  The parameters are part of the envelope format:
//! they are not stored in the vault file, so every vault ever written
//! with the defaults must be opened with exactly the same values.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;

use super::keys::{DerivedKey, KEY_LEN};
use crate::errors::{VaultError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Argon2id cost parameters.
///
/// `Default` is the fixed parameter set of the vault format
/// (64 MiB, 3 iterations, 4 lanes).  Other values only exist so that
/// callers such as test suites can trade strength for speed explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB (default: 65 536 = 64 MiB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

impl KdfParams {
    /// Reject parameter sets that are dangerously weak.
    ///
    /// Weak parameters are an error, never something to adjust silently.
    pub fn validate(&self) -> Result<()> {
        if self.memory_kib < MIN_MEMORY_KIB {
            return Err(VaultError::ConfigError(format!(
                "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
                self.memory_kib
            )));
        }
        if self.iterations < 1 {
            return Err(VaultError::ConfigError(
                "Argon2 iterations must be at least 1".into(),
            ));
        }
        if self.parallelism < 1 {
            return Err(VaultError::ConfigError(
                "Argon2 parallelism must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Derive a 32-byte key from a password and salt with the default
/// (format) parameters.
pub fn derive_key(password: &[u8], salt: &[u8; SALT_LEN]) -> Result<DerivedKey> {
    derive_key_with_params(password, salt, &KdfParams::default())
}

/// Derive a 32-byte key with explicit Argon2id parameters.
///
/// The same password + salt + params always produce the same key.  The
/// only failure mode is Argon2 being unable to run with the requested
/// budget, reported as `ResourceExhaustion`.
pub fn derive_key_with_params(
    password: &[u8],
    salt: &[u8; SALT_LEN],
    kdf_params: &KdfParams,
) -> Result<DerivedKey> {
    kdf_params.validate()?;

    let params = Params::new(
        kdf_params.memory_kib,
        kdf_params.iterations,
        kdf_params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| VaultError::ResourceExhaustion(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = DerivedKey::zeroed();
    argon2
        .hash_password_into(password, salt, key.as_mut_bytes())
        .map_err(|e| VaultError::ResourceExhaustion(format!("Argon2id hashing failed: {e}")))?;

    Ok(key)
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_match_format() {
        let p = KdfParams::default();
        assert_eq!(p.memory_kib, 65_536);
        assert_eq!(p.iterations, 3);
        assert_eq!(p.parallelism, 4);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn rejects_weak_memory() {
        let p = KdfParams {
            memory_kib: 1024,
            ..KdfParams::default()
        };
        assert!(matches!(p.validate(), Err(VaultError::ConfigError(_))));
    }

    #[test]
    fn rejects_zero_iterations_and_lanes() {
        let p = KdfParams {
            iterations: 0,
            ..KdfParams::default()
        };
        assert!(p.validate().is_err());

        let p = KdfParams {
            parallelism: 0,
            ..KdfParams::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn weak_params_are_not_used_for_derivation() {
        let p = KdfParams {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        };
        let salt = [7u8; SALT_LEN];
        assert!(derive_key_with_params(b"pw", &salt, &p).is_err());
    }

    #[test]
    fn salts_are_random() {
        assert_ne!(generate_salt(), generate_salt());
    }
}
