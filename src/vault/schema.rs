//! Entry types and their field schemas.
//!
//! The set of types is closed.  Each type lists the string fields that
//! are meaningful for it; anything else supplied for an entry is ignored.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{VaultError, Result};

/// The kind of secret an entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Login,
    Note,
    CreditCard,
    Identity,
    ApiCredential,
    Database,
    Server,
    SoftwareLicense,
    SshKey,
    Wifi,
    BankAccount,
}

/// Field names whose values are masked unless the user asks to reveal them.
pub const SECRET_FIELDS: &[&str] = &[
    "password",
    "passphrase",
    "private_key",
    "card_number",
    "security_code",
    "pin",
    "api_key",
    "api_secret",
    "license_key",
    "ssn",
    "passport_number",
    "account_number",
    "iban",
];

impl EntryType {
    /// Every entry type, in display order.
    pub const ALL: [EntryType; 11] = [
        EntryType::Login,
        EntryType::Note,
        EntryType::CreditCard,
        EntryType::Identity,
        EntryType::ApiCredential,
        EntryType::Database,
        EntryType::Server,
        EntryType::SoftwareLicense,
        EntryType::SshKey,
        EntryType::Wifi,
        EntryType::BankAccount,
    ];

    /// Wire name of the type, as stored in the vault JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            EntryType::Login => "login",
            EntryType::Note => "note",
            EntryType::CreditCard => "credit_card",
            EntryType::Identity => "identity",
            EntryType::ApiCredential => "api_credential",
            EntryType::Database => "database",
            EntryType::Server => "server",
            EntryType::SoftwareLicense => "software_license",
            EntryType::SshKey => "ssh_key",
            EntryType::Wifi => "wifi",
            EntryType::BankAccount => "bank_account",
        }
    }

    /// The type-dependent fields an entry of this type carries.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            EntryType::Login => &["url", "username", "password", "notes"],
            EntryType::Note => &["notes"],
            EntryType::CreditCard => &[
                "cardholder_name",
                "card_number",
                "expiration_date",
                "security_code",
                "pin",
                "notes",
            ],
            EntryType::Identity => &[
                // Personal
                "prefix_title",
                "full_name",
                "email",
                "phone",
                "birth_date",
                "gender",
                // Address
                "organization",
                "address",
                "postal_code",
                "city",
                "state",
                "country",
                // Contact
                "ssn",
                "passport_number",
                "license_number",
                "website",
                "x_handle",
                "linkedin",
                "reddit",
                "facebook",
                "yahoo",
                "instagram",
                // Work
                "company",
                "job_title",
                "work_website",
                "work_phone",
                "work_email",
                "notes",
            ],
            EntryType::ApiCredential => &[
                "api_key",
                "api_secret",
                "expiration_date",
                "permissions",
                "notes",
            ],
            EntryType::Database => &[
                "host",
                "port",
                "username",
                "password",
                "database_type",
                "database_name",
                "notes",
            ],
            EntryType::Server => &[
                "ip_address",
                "hostname",
                "os",
                "username",
                "password",
                "notes",
            ],
            EntryType::SoftwareLicense => {
                &["license_key", "product", "expiry_date", "owner", "notes"]
            }
            EntryType::SshKey => &[
                "public_key",
                "private_key",
                "passphrase",
                "username",
                "host",
                "notes",
            ],
            EntryType::Wifi => &["ssid", "password", "security_type", "notes"],
            EntryType::BankAccount => &[
                "bank_name",
                "account_number",
                "routing_number",
                "account_type",
                "iban",
                "swift_bic",
                "holder_name",
                "notes",
            ],
        }
    }

    /// Returns `true` if `field` belongs to this type's schema.
    pub fn has_field(self, field: &str) -> bool {
        self.fields().contains(&field)
    }

    /// Returns `true` if `field` is part of this type and holds a secret.
    pub fn is_secret_field(self, field: &str) -> bool {
        self.has_field(field) && SECRET_FIELDS.contains(&field)
    }

    /// Whether this type has a field that can receive a generated password.
    pub fn password_field(self) -> Option<&'static str> {
        match self {
            EntryType::Login | EntryType::Database | EntryType::Server | EntryType::Wifi => {
                Some("password")
            }
            EntryType::SshKey => Some("passphrase"),
            _ => None,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        EntryType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| VaultError::InvalidEntryType(s.to_string()))
    }
}
