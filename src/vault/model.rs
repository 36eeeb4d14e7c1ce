//! The logical vault: a format version tag and an ordered list of entries.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::entry::{Entry, EntryFields, EntryPreview};
use super::schema::EntryType;
use crate::errors::{VaultError, Result};

/// Current vault format version.
pub const FORMAT_VERSION: u32 = 1;

/// Random bytes behind each entry ID (96 bits).
const ENTRY_ID_BYTES: usize = 12;

/// The whole secret store.  Read, mutated, and rewritten as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    pub version: u32,
    /// Insertion order is preserved.
    pub entries: Vec<Entry>,
}

impl Default for Vault {
    fn default() -> Self {
        Self::empty()
    }
}

impl Vault {
    /// A fresh vault with no entries.
    pub fn empty() -> Self {
        Self {
            version: FORMAT_VERSION,
            entries: Vec::new(),
        }
    }

    pub fn find(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Look up an entry, failing with `EntryNotFound`.
    pub fn get(&self, id: &str) -> Result<&Entry> {
        self.find(id)
            .ok_or_else(|| VaultError::EntryNotFound(id.to_string()))
    }

    /// Create an entry from raw input and append it.  Returns the new entry.
    pub fn add_entry(
        &mut self,
        entry_type: EntryType,
        input: &EntryFields,
        now: DateTime<Utc>,
    ) -> &Entry {
        let entry = Entry::new(entry_type, input, now);
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Update an existing entry in place.  Returns the updated entry.
    pub fn update_entry(
        &mut self,
        id: &str,
        input: &EntryFields,
        now: DateTime<Utc>,
    ) -> Result<&Entry> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| VaultError::EntryNotFound(id.to_string()))?;
        entry.apply_update(input, now);
        Ok(&*entry)
    }

    /// Remove an entry, returning it.
    pub fn remove_entry(&mut self, id: &str) -> Result<Entry> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| VaultError::EntryNotFound(id.to_string()))?;
        Ok(self.entries.remove(index))
    }

    /// List projections of every entry, in vault order.
    pub fn previews(&self) -> Vec<EntryPreview> {
        self.entries.iter().map(Entry::preview).collect()
    }
}

/// Generate a random entry ID: 12 random bytes, base64url, no padding.
pub fn generate_entry_id() -> String {
    let mut bytes = [0u8; ENTRY_ID_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
