//! `secretvault delete`: remove an entry from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{prompt_password, App};
use crate::errors::{VaultError, Result};

/// Execute the `delete` command.
pub fn execute(app: &App, id: &str, force: bool) -> Result<()> {
    let password = prompt_password()?;
    let mut vault = app.load(&password)?;

    let title = vault.get(id)?.title.clone();

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete '{title}' ({id})?"))
            .default(false)
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    vault.remove_entry(id)?;
    app.save(&vault, &password)?;

    output::success(&format!("Deleted '{title}' ({id})"));

    Ok(())
}
