//! Vault module: the encrypted secret store.
//!
//! This module provides:
//! - Entry types and field schemas (`schema`)
//! - `Entry` and its list projection `EntryPreview` (`entry`)
//! - The `Vault` structure and entry ID generation (`model`)
//! - The salt || nonce || ciphertext envelope (`codec`)
//! - File-backed load/save with atomic replace (`store`)

pub mod codec;
pub mod entry;
pub mod model;
pub mod schema;
pub mod store;

// Re-export the most commonly used items.
pub use codec::{CodecConfig, VaultCodec, ENVELOPE_HEADER_LEN};
pub use entry::{Entry, EntryFields, EntryPreview};
pub use model::{generate_entry_id, Vault, FORMAT_VERSION};
pub use schema::EntryType;
pub use store::VaultStore;
