//! Per-invocation context shared by the vault commands.
//!
//! Resolves settings and the vault path, and owns the optional backup
//! machinery: a small tokio runtime, the backup target, and the queue that
//! uploads each saved envelope.  Vault work (KDF included) runs on the
//! calling thread; the runtime only serves backup I/O.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::backup::{BackupQueue, BackupTarget, DirectoryBackup};
use crate::config::Settings;
use crate::errors::{VaultError, Result};
use crate::vault::{Vault, VaultCodec, VaultStore};

use super::Cli;

struct Backup {
    runtime: Runtime,
    target: Arc<dyn BackupTarget>,
    queue: BackupQueue,
}

/// Everything a command needs to operate on the vault.
pub struct App {
    pub settings: Settings,
    pub store: VaultStore,
    backup: Option<Backup>,
}

impl App {
    /// Build the context from CLI flags and the config file.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir()?;

        let settings = super::load_settings(cli)?;

        let vault_path = match &cli.vault_file {
            Some(path) => cwd.join(path),
            None => settings.vault_path(&cwd),
        };

        let backup = match settings.backup_path(&cwd) {
            Some(dir) => {
                let target = DirectoryBackup::new(dir, settings.backup_file_name.clone());
                Some(Self::start_backup(Arc::new(target), &settings)?)
            }
            None => None,
        };

        Ok(Self::new(settings, VaultStore::new(vault_path, VaultCodec::default()), backup))
    }

    /// Build a context around an explicit store and optional backup target.
    pub fn with_backup(
        settings: Settings,
        store: VaultStore,
        target: Option<Arc<dyn BackupTarget>>,
    ) -> Result<Self> {
        let backup = match target {
            Some(t) => Some(Self::start_backup(t, &settings)?),
            None => None,
        };
        Ok(Self::new(settings, store, backup))
    }

    fn new(settings: Settings, store: VaultStore, backup: Option<Backup>) -> Self {
        debug!(
            path = %store.path().display(),
            backup = backup.as_ref().map(|b| b.target.name()),
            "resolved vault"
        );
        Self {
            settings,
            store,
            backup,
        }
    }

    fn start_backup(target: Arc<dyn BackupTarget>, settings: &Settings) -> Result<Backup> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("secretvault-backup")
            .enable_all()
            .build()?;
        let queue = BackupQueue::start(runtime.handle(), target.clone(), settings.retry_policy());
        Ok(Backup {
            runtime,
            target,
            queue,
        })
    }

    pub fn vault_path(&self) -> PathBuf {
        self.store.path().to_path_buf()
    }

    /// Load the vault with the given master password.
    pub fn load(&self, password: &str) -> Result<Vault> {
        self.store.load(password)
    }

    /// Save the vault and queue the new envelope for backup.
    ///
    /// The result reflects the local save only.
    pub fn save(&self, vault: &Vault, password: &str) -> Result<()> {
        let envelope = self.store.save(vault, password)?;
        self.queue_backup(envelope);
        Ok(())
    }

    /// Hand an envelope that is already on disk to the backup queue.
    pub fn queue_backup(&self, envelope: Vec<u8>) {
        if let Some(backup) = &self.backup {
            backup.queue.submit(envelope);
        }
    }

    /// Queue the vault file as it is on disk, without decrypting it.
    ///
    /// Covers vaults that existed before a backup target was configured.
    pub fn backup_existing(&self) -> Result<usize> {
        self.require_backup()?;
        let envelope = self.store.read_envelope()?;
        let len = envelope.len();
        self.queue_backup(envelope);
        Ok(len)
    }

    /// Fetch the backed-up envelope, if a backup target is configured.
    pub fn fetch_backup(&self) -> Result<Option<Vec<u8>>> {
        let backup = self.require_backup()?;
        backup.runtime.block_on(backup.target.fetch())
    }

    fn require_backup(&self) -> Result<&Backup> {
        self.backup.as_ref().ok_or_else(|| {
            VaultError::ConfigError("no backup_dir configured in .secretvault.toml".into())
        })
    }

    /// Wait for queued backups to finish.  Call before exiting.
    pub fn finish(self) {
        if let Some(Backup { runtime, queue, .. }) = self.backup {
            runtime.block_on(queue.shutdown());
        }
    }
}
