//! `secretvault version`: display the version.

use console::style;

use crate::errors::Result;

/// Execute the `version` command.
pub fn execute() -> Result<()> {
    let current = env!("CARGO_PKG_VERSION");
    println!("secretvault {}", style(current).green().bold());
    Ok(())
}
