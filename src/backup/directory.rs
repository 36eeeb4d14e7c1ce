//! Backup target that keeps a copy of the envelope in a directory
//! (for example a mounted network share or a synced folder).

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::BackupTarget;
use crate::errors::{VaultError, Result};

/// Mirrors the envelope to `<dir>/<file_name>`.
#[derive(Debug, Clone)]
pub struct DirectoryBackup {
    dir: PathBuf,
    file_name: String,
}

impl DirectoryBackup {
    pub fn new(dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_name: file_name.into(),
        }
    }

    /// Full path of the backup copy.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

#[async_trait]
impl BackupTarget for DirectoryBackup {
    fn name(&self) -> &str {
        "directory"
    }

    async fn fetch(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(self.path()).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(VaultError::BackupFailed(format!(
                "cannot read {}: {e}",
                self.path().display()
            ))),
        }
    }

    async fn store(&self, envelope: &[u8]) -> Result<()> {
        let fail = |e: std::io::Error| {
            VaultError::BackupFailed(format!("cannot write {}: {e}", self.path().display()))
        };

        fs::create_dir_all(&self.dir).await.map_err(fail)?;

        // Temp file + rename so the backup copy is never half-written.
        let tmp_path = self.dir.join(format!(".{}.tmp", self.file_name));
        fs::write(&tmp_path, envelope).await.map_err(fail)?;
        fs::rename(&tmp_path, self.path()).await.map_err(fail)?;

        debug!(path = %self.path().display(), len = envelope.len(), "stored backup copy");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn fetch_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let target = DirectoryBackup::new(dir.path(), "vault.enc");
        assert!(target.fetch().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn store_then_fetch_returns_same_bytes() {
        let dir = TempDir::new().unwrap();
        let target = DirectoryBackup::new(dir.path().join("nested"), "vault.enc");

        target.store(b"opaque-envelope").await.unwrap();
        assert_eq!(
            target.fetch().await.unwrap().as_deref(),
            Some(&b"opaque-envelope"[..])
        );

        target.store(b"newer").await.unwrap();
        assert_eq!(target.fetch().await.unwrap().as_deref(), Some(&b"newer"[..]));
        assert!(!dir.path().join("nested").join(".vault.enc.tmp").exists());
    }
}
