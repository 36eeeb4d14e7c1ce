//! CLI module: Clap argument parser, shared context, output helpers, and
//! command implementations.

pub mod app;
pub mod commands;
pub mod output;

use clap::Parser;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{VaultError, Result};
use crate::vault::{EntryFields, EntryType};

pub use app::App;

/// Environment variable consulted before prompting for the master password.
pub const PASSWORD_ENV: &str = "SECRETVAULT_PASSWORD";

/// SecretVault CLI: self-hosted encrypted secrets vault.
#[derive(Parser)]
#[command(
    name = "secretvault",
    about = "Self-hosted encrypted secrets vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the vault file (default: vault.enc)
    #[arg(long, env = "SECRETVAULT_FILE", global = true)]
    pub vault_file: Option<String>,

    /// Path to a config file (default: ./.secretvault.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Increase diagnostic output (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new, empty vault protected by a master password
    Init,

    /// List entries (no secret values are shown)
    List {
        /// Only show entries of this type (e.g. login, wifi)
        #[arg(short = 't', long = "type")]
        entry_type: Option<String>,
    },

    /// Show one entry in full
    Show {
        /// Entry ID
        id: String,

        /// Print secret fields instead of masking them
        #[arg(long)]
        reveal: bool,

        /// Copy this field's value to the clipboard instead of printing
        #[arg(long, value_name = "FIELD")]
        copy: Option<String>,
    },

    /// Add a new entry
    Add {
        /// Entry type: login, note, credit_card, identity, api_credential,
        /// database, server, software_license, ssh_key, wifi, bank_account
        entry_type: String,

        /// Entry title
        #[arg(long)]
        title: Option<String>,

        /// Field value (repeatable), e.g. --field username=alice
        #[arg(short, long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,

        /// Fill the entry's password field with a generated password
        #[arg(short, long)]
        generate_password: bool,
    },

    /// Update an existing entry
    Edit {
        /// Entry ID
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// Field value (repeatable), e.g. --field password=s3cret
        #[arg(short, long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,
    },

    /// Delete an entry
    Delete {
        /// Entry ID
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Print a random password
    Generate {
        /// Number of characters (default from config, 20)
        #[arg(short, long)]
        length: Option<usize>,
    },

    /// Copy the current vault file to the configured backup
    Backup,

    /// Restore the vault file from the configured backup
    Restore,

    /// Show version
    Version,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load settings from `--config`, or from `.secretvault.toml` in the
/// working directory when the flag is absent.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    match &cli.config {
        Some(path) => Settings::load_file(&cwd.join(path)),
        None => Settings::load(&cwd),
    }
}

/// Get the master password, trying in order:
/// 1. `SECRETVAULT_PASSWORD` env var (scripted use)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation (used by `init`).
///
/// Also respects `SECRETVAULT_PASSWORD`.  Enforces `min_len`.
pub fn prompt_new_password(min_len: usize) -> Result<Zeroizing<String>> {
    let password = match password_from_env() {
        Some(pw) => pw,
        None => {
            let first = Zeroizing::new(
                dialoguer::Password::new()
                    .with_prompt("Choose master password")
                    .interact()
                    .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?,
            );
            let confirm = Zeroizing::new(
                dialoguer::Password::new()
                    .with_prompt("Confirm master password")
                    .interact()
                    .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?,
            );
            if !passwords_match(&first, &confirm) {
                return Err(VaultError::PasswordMismatch);
            }
            first
        }
    };

    check_password_len(&password, min_len)?;
    Ok(password)
}

fn password_from_env() -> Option<Zeroizing<String>> {
    std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|pw| !pw.is_empty())
        .map(Zeroizing::new)
}

/// Constant-time comparison of a password and its confirmation.
pub fn passwords_match(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Enforce the minimum master password length (in characters).
pub fn check_password_len(password: &str, min_len: usize) -> Result<()> {
    if password.chars().count() < min_len {
        return Err(VaultError::CommandFailed(format!(
            "password must be at least {min_len} characters"
        )));
    }
    Ok(())
}

/// Parse a `NAME=VALUE` argument.  The value may itself contain `=`.
pub fn parse_field(arg: &str) -> Result<(String, String)> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| VaultError::InvalidField(format!("'{arg}' is not NAME=VALUE")))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(VaultError::InvalidField(format!("'{arg}' has an empty name")));
    }

    Ok((name.to_string(), value.to_string()))
}

/// Collect `--title` and `--field` arguments into entry input.
///
/// Names outside `entry_type`'s schema are reported with a warning; the
/// vault itself ignores them.
pub fn collect_fields(
    entry_type: EntryType,
    title: Option<&str>,
    raw_fields: &[String],
) -> Result<EntryFields> {
    let mut input = EntryFields::new();

    for raw in raw_fields {
        let (name, value) = parse_field(raw)?;
        if name != "title" && !entry_type.has_field(&name) {
            output::warning(&format!(
                "'{name}' is not a {entry_type} field and will be ignored"
            ));
        }
        input.insert(name, value);
    }

    if let Some(t) = title {
        input.insert("title".to_string(), t.to_string());
    }

    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_field_splits_on_first_equals() {
        assert_eq!(
            parse_field("url=https://x?a=b").unwrap(),
            ("url".to_string(), "https://x?a=b".to_string())
        );
        assert_eq!(
            parse_field("notes=").unwrap(),
            ("notes".to_string(), String::new())
        );
    }

    #[test]
    fn parse_field_rejects_bad_input() {
        assert!(matches!(parse_field("novalue"), Err(VaultError::InvalidField(_))));
        assert!(parse_field("=value").is_err());
    }

    #[test]
    fn collect_fields_merges_title() {
        let raw = vec!["username=alice".to_string(), "title=ignored".to_string()];
        let input = collect_fields(EntryType::Login, Some("Email"), &raw).unwrap();
        assert_eq!(input["username"], "alice");
        assert_eq!(input["title"], "Email");
    }

    #[test]
    fn password_length_is_counted_in_chars() {
        assert!(check_password_len("correctpassword", 8).is_ok());
        assert!(check_password_len("short", 8).is_err());
        assert!(check_password_len("ääääääää", 8).is_ok());
    }

    #[test]
    fn password_comparison() {
        assert!(passwords_match("same-password", "same-password"));
        assert!(!passwords_match("same-password", "same-passwore"));
        assert!(!passwords_match("short", "longer"));
    }
}
