//! Cryptographic primitives for SecretVault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - Argon2id password-based key derivation (`kdf`)
//! - The zeroizing derived-key holder (`keys`)
//! - Random password generation (`generator`)

pub mod encryption;
pub mod generator;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_key, ...};
pub use encryption::{decrypt, encrypt, NONCE_LEN, TAG_LEN};
pub use generator::generate_password;
pub use kdf::{derive_key, derive_key_with_params, generate_salt, KdfParams, SALT_LEN};
pub use keys::{DerivedKey, KEY_LEN};
