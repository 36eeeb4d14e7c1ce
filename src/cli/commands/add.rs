//! `secretvault add`: create an entry from `--title` and `--field` flags.

use chrono::Utc;

use crate::cli::output;
use crate::cli::{collect_fields, prompt_password, App};
use crate::crypto::generate_password;
use crate::errors::{VaultError, Result};
use crate::vault::EntryType;

/// Execute the `add` command.
pub fn execute(
    app: &App,
    entry_type: &str,
    title: Option<&str>,
    raw_fields: &[String],
    generate: bool,
) -> Result<()> {
    // Validate everything before asking for the password.
    let entry_type: EntryType = entry_type.parse()?;
    let mut input = collect_fields(entry_type, title, raw_fields)?;

    if generate {
        let field = entry_type.password_field().ok_or_else(|| {
            VaultError::InvalidField(format!("{entry_type} entries have no password field"))
        })?;
        let generated = generate_password(app.settings.generated_password_len)?;
        input.insert(field.to_string(), generated.to_string());
    }

    let password = prompt_password()?;
    let mut vault = app.load(&password)?;
    let entry = vault.add_entry(entry_type, &input, Utc::now());
    let (id, title) = (entry.id.clone(), entry.title.clone());

    app.save(&vault, &password)?;

    output::success(&format!("Added {entry_type} '{title}' ({id})"));
    if generate {
        output::tip(&format!("Reveal it with: secretvault show {id} --reveal"));
    }

    Ok(())
}
