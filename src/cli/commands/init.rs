//! `secretvault init`: create a new, empty vault.

use crate::cli::output;
use crate::cli::{prompt_new_password, App};
use crate::errors::{VaultError, Result};

/// Execute the `init` command.
pub fn execute(app: &App) -> Result<()> {
    let path = app.vault_path();

    if app.store.exists() {
        output::tip("Use `secretvault add` to add entries to the existing vault.");
        return Err(VaultError::VaultAlreadyExists(path));
    }

    let password = prompt_new_password(app.settings.min_password_len)?;
    let (_, envelope) = app.store.create(&password)?;
    app.queue_backup(envelope);

    output::success(&format!("Vault created at {}", path.display()));
    output::tip("Add an entry: secretvault add login --title \"Email\" --field username=you");

    Ok(())
}
