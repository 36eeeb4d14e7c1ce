//! `secretvault generate`: print a random password.  No vault needed.

use crate::config::Settings;
use crate::crypto::generate_password;
use crate::errors::Result;

/// Execute the `generate` command.
pub fn execute(settings: &Settings, length: Option<usize>) -> Result<()> {
    let password = generate_password(length.unwrap_or(settings.generated_password_len))?;
    println!("{}", password.as_str());
    Ok(())
}
