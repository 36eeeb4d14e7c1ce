//! `secretvault restore`: recreate the local vault file from the backup.

use tracing::info;

use crate::cli::output;
use crate::cli::{prompt_password, App};
use crate::errors::{VaultError, Result};

/// Execute the `restore` command.
///
/// Only runs when there is no local vault; the backup is decrypted with
/// the supplied password before it is written.
pub fn execute(app: &App) -> Result<()> {
    let path = app.vault_path();
    if app.store.exists() {
        output::tip("Move the existing vault aside first if you really want the backup copy.");
        return Err(VaultError::VaultAlreadyExists(path));
    }

    let envelope = app
        .fetch_backup()?
        .ok_or_else(|| VaultError::BackupFailed("no backup found".into()))?;

    let password = prompt_password()?;
    let vault = app.store.codec().decrypt(&envelope, &password)?;
    app.store.install(&envelope)?;

    info!(entries = vault.entries.len(), "restored vault from backup");
    output::success(&format!(
        "Restored {} to {}",
        output::entry_count(vault.entries.len()),
        path.display()
    ));

    Ok(())
}
