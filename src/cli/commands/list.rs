//! `secretvault list`: show every entry as a table of previews.

use crate::cli::output;
use crate::cli::{prompt_password, App};
use crate::errors::Result;
use crate::vault::EntryType;

/// Execute the `list` command.
pub fn execute(app: &App, entry_type: Option<&str>) -> Result<()> {
    let filter = entry_type.map(str::parse::<EntryType>).transpose()?;

    let password = prompt_password()?;
    let vault = app.load(&password)?;

    let previews: Vec<_> = vault
        .previews()
        .into_iter()
        .filter(|p| filter.map_or(true, |t| p.entry_type == t))
        .collect();

    output::info(&output::entry_count(previews.len()));
    output::print_entries_table(&previews);

    Ok(())
}
