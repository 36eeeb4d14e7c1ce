//! `secretvault show`: print one entry, or copy a field to the clipboard.

use crate::cli::output;
use crate::cli::{prompt_password, App};
use crate::errors::{VaultError, Result};
use crate::vault::Entry;

/// Execute the `show` command.
pub fn execute(app: &App, id: &str, reveal: bool, copy: Option<&str>) -> Result<()> {
    let password = prompt_password()?;
    let vault = app.load(&password)?;
    let entry = vault.get(id)?;

    match copy {
        Some(field) => {
            let value = copy_value(entry, field)?;
            copy_to_clipboard(value)?;
            output::success(&format!("Copied '{field}' of '{}' to the clipboard", entry.title));
        }
        None => output::print_entry(entry, reveal),
    }

    Ok(())
}

/// The value `--copy FIELD` refers to.  `title` is accepted too.
fn copy_value<'a>(entry: &'a Entry, field: &str) -> Result<&'a str> {
    if field == "title" {
        return Ok(&entry.title);
    }
    if !entry.entry_type.has_field(field) {
        return Err(VaultError::InvalidField(format!(
            "'{field}' is not a {} field",
            entry.entry_type
        )));
    }
    match entry.field(field) {
        "" => Err(VaultError::InvalidField(format!("'{field}' is empty"))),
        value => Ok(value),
    }
}

fn copy_to_clipboard(value: &str) -> Result<()> {
    arboard::Clipboard::new()
        .and_then(|mut clipboard| clipboard.set_text(value.to_string()))
        .map_err(|e| VaultError::ClipboardError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::{EntryFields, EntryType};
    use chrono::Utc;

    fn login() -> Entry {
        let mut input = EntryFields::new();
        input.insert("title".into(), "Email".into());
        input.insert("password".into(), "hunter2".into());
        Entry::new(EntryType::Login, &input, Utc::now())
    }

    #[test]
    fn copy_value_reads_schema_fields() {
        let entry = login();
        assert_eq!(copy_value(&entry, "password").unwrap(), "hunter2");
        assert_eq!(copy_value(&entry, "title").unwrap(), "Email");
    }

    #[test]
    fn copy_value_rejects_unknown_or_empty() {
        let entry = login();
        assert!(matches!(
            copy_value(&entry, "card_number"),
            Err(VaultError::InvalidField(_))
        ));
        assert!(copy_value(&entry, "username").is_err());
    }
}
