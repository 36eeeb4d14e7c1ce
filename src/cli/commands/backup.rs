//! `secretvault backup`: push the vault file to the backup target.
//!
//! Saves are backed up automatically; this is for a vault that existed
//! before `backup_dir` was set.  No password is needed since the file is
//! copied as-is.

use crate::cli::output;
use crate::cli::App;
use crate::errors::Result;

/// Execute the `backup` command.
pub fn execute(app: &App) -> Result<()> {
    let len = app.backup_existing()?;
    output::success(&format!(
        "Queued {} ({len} bytes) for backup",
        app.vault_path().display()
    ));
    Ok(())
}
