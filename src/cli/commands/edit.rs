//! `secretvault edit`: update an entry's title or fields.

use chrono::Utc;

use crate::cli::output;
use crate::cli::{collect_fields, prompt_password, App};
use crate::errors::{VaultError, Result};

/// Execute the `edit` command.
pub fn execute(app: &App, id: &str, title: Option<&str>, raw_fields: &[String]) -> Result<()> {
    if title.is_none() && raw_fields.is_empty() {
        return Err(VaultError::CommandFailed(
            "nothing to change: pass --title or --field NAME=VALUE".into(),
        ));
    }

    let password = prompt_password()?;
    let mut vault = app.load(&password)?;

    let entry_type = vault.get(id)?.entry_type;
    let input = collect_fields(entry_type, title, raw_fields)?;
    let entry = vault.update_entry(id, &input, Utc::now())?;
    let title = entry.title.clone();

    app.save(&vault, &password)?;
    output::success(&format!("Updated '{title}' ({id})"));

    Ok(())
}
