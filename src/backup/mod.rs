//! Remote backup of the vault envelope.
//!
//! A backup target only ever sees the envelope as an opaque blob: it
//! never parses, inspects, or modifies it.  Uploads run in the background
//! after a local save has committed and cannot change that save's result.
//!
//! - `BackupTarget` trait (`fetch` / `store`)
//! - `DirectoryBackup`, a target that mirrors the envelope into a directory
//! - `BackupQueue`, the background uploader with retry (`queue`)

pub mod directory;
pub mod queue;

use async_trait::async_trait;

use crate::errors::Result;

pub use directory::DirectoryBackup;
pub use queue::{BackupQueue, RetryPolicy};

/// Whole-file get/put storage for the vault envelope.
#[async_trait]
pub trait BackupTarget: Send + Sync {
    /// Short human-readable name used in logs.
    fn name(&self) -> &str;

    /// Fetch the stored envelope, or `None` if nothing has been backed up.
    async fn fetch(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the stored envelope.
    async fn store(&self, envelope: &[u8]) -> Result<()>;
}
