//! File-backed vault persistence used by the CLI commands.
//!
//! `VaultStore` binds a vault file path to a `VaultCodec`.  Every entry
//! operation is load → mutate → save of the whole vault; there is no
//! partial write.  The store does no locking: callers must not run two
//! saves against the same file at once.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::{VaultError, Result};

use super::codec::VaultCodec;
use super::model::Vault;

/// Handle on a single vault file.
#[derive(Debug, Clone)]
pub struct VaultStore {
    /// Path to the vault file on disk.
    path: PathBuf,

    codec: VaultCodec,
}

impl VaultStore {
    pub fn new(path: impl Into<PathBuf>, codec: VaultCodec) -> Self {
        Self {
            path: path.into(),
            codec,
        }
    }

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn codec(&self) -> &VaultCodec {
        &self.codec
    }

    /// Returns `true` if the vault file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create a brand-new, empty vault file protected by `password`.
    ///
    /// Returns the empty vault together with the envelope that was written.
    pub fn create(&self, password: &str) -> Result<(Vault, Vec<u8>)> {
        if self.exists() {
            return Err(VaultError::VaultAlreadyExists(self.path.clone()));
        }

        let vault = Vault::empty();
        let envelope = self.save(&vault, password)?;
        info!(path = %self.path.display(), "created vault");
        Ok((vault, envelope))
    }

    /// Read the whole vault file and decrypt it.
    ///
    /// Wrong password and corrupted file are the same `DecryptFailure`.
    pub fn load(&self, password: &str) -> Result<Vault> {
        let envelope = self.read_envelope()?;
        self.codec.decrypt(&envelope, password)
    }

    /// Read the raw envelope without decrypting it.
    pub fn read_envelope(&self) -> Result<Vec<u8>> {
        if !self.exists() {
            return Err(VaultError::VaultNotFound(self.path.clone()));
        }

        let envelope = fs::read(&self.path)?;
        debug!(path = %self.path.display(), len = envelope.len(), "read vault file");
        Ok(envelope)
    }

    /// Encrypt `vault` and replace the vault file with the new envelope.
    ///
    /// Returns the envelope so it can be handed to a backup target.
    pub fn save(&self, vault: &Vault, password: &str) -> Result<Vec<u8>> {
        let envelope = self.codec.encrypt(vault, password)?;
        self.install(&envelope)?;
        info!(
            path = %self.path.display(),
            entries = vault.entries.len(),
            "saved vault"
        );
        Ok(envelope)
    }

    /// Write an envelope as the complete content of the vault file,
    /// **atomically**.
    ///
    /// 1. Write to a temp file in the same directory, created owner-only
    ///    on Unix.
    /// 2. Rename the temp file over the target path.
    ///
    /// The rename ensures readers never see a half-written file.  On any
    /// failure the temp file is removed.
    pub fn install(&self, envelope: &[u8]) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ));

        // A stale temp file would keep its old permissions.
        let _ = fs::remove_file(&tmp_path);

        let result = write_private(&tmp_path, envelope)
            .and_then(|()| fs::rename(&tmp_path, &self.path));
        if let Err(e) = result {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        Ok(())
    }
}

/// Create (or truncate) `path` readable by the owner only and write `bytes`.
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
