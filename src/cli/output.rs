//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::{Entry, EntryPreview};

/// Shown in place of a secret value.
const MASK: &str = "••••••••";

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// "1 entry", "3 entries".
pub fn entry_count(n: usize) -> String {
    if n == 1 {
        "1 entry".to_string()
    } else {
        format!("{n} entries")
    }
}

/// Print a table of entry previews (ID, Type, Title, Summary, Updated).
pub fn print_entries_table(entries: &[EntryPreview]) {
    if entries.is_empty() {
        info("No entries in this vault yet.");
        tip("Run `secretvault add <TYPE> --title <TITLE>` to add your first entry.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Type", "Title", "Summary", "Updated"]);

    for e in entries {
        let summary = e
            .summary
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join(", ");

        table.add_row(vec![
            e.id.clone(),
            e.entry_type.to_string(),
            e.title.clone(),
            summary,
            e.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{table}");
}

/// Print every field of an entry.  Secret fields are masked unless
/// `reveal` is set.
pub fn print_entry(entry: &Entry, reveal: bool) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);

    table.add_row(vec!["id".to_string(), entry.id.clone()]);
    table.add_row(vec!["type".to_string(), entry.entry_type.to_string()]);
    table.add_row(vec!["title".to_string(), entry.title.clone()]);

    for &name in entry.entry_type.fields() {
        let value = entry.field(name);
        let shown = if !reveal && !value.is_empty() && entry.entry_type.is_secret_field(name) {
            MASK.to_string()
        } else {
            value.to_string()
        };
        table.add_row(vec![name.to_string(), shown]);
    }

    table.add_row(vec![
        "created_at".to_string(),
        entry.created_at.to_rfc3339(),
    ]);
    table.add_row(vec![
        "updated_at".to_string(),
        entry.updated_at.to_rfc3339(),
    ]);

    println!("{table}");
}
