//! Entry and EntryPreview types stored inside a vault.
//!
//! An entry serializes as one flat JSON object: the fixed keys (`id`,
//! `type`, `title`, `created_at`, `updated_at`) side by side with the
//! type-dependent string fields.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::generate_entry_id;
use super::schema::EntryType;

/// Incoming field values for creating or updating an entry
/// (field name -> value).  May include `title`.
pub type EntryFields = BTreeMap<String, String>;

/// Number of characters of a note shown in its preview.
const NOTE_PREVIEW_CHARS: usize = 50;

/// A single secret record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Opaque URL-safe identifier, immutable after creation.
    pub id: String,

    #[serde(rename = "type")]
    pub entry_type: EntryType,

    #[serde(default)]
    pub title: String,

    /// When this entry was created.  Never changes.
    pub created_at: DateTime<Utc>,

    /// When this entry was last modified.
    pub updated_at: DateTime<Utc>,

    /// Type-dependent fields.
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl Entry {
    /// Build a new entry of `entry_type` from caller-supplied values.
    ///
    /// Every schema field is present afterwards (missing ones as `""`);
    /// values for fields outside the schema are dropped.
    pub fn new(entry_type: EntryType, input: &EntryFields, now: DateTime<Utc>) -> Self {
        let fields = entry_type
            .fields()
            .iter()
            .map(|&name| {
                let value = input.get(name).cloned().unwrap_or_default();
                (name.to_string(), value)
            })
            .collect();

        Self {
            id: generate_entry_id(),
            entry_type,
            title: input.get("title").cloned().unwrap_or_default(),
            created_at: now,
            updated_at: now,
            fields,
        }
    }

    /// Apply an update from caller-supplied values.
    ///
    /// Only fields present in `input` change; fields outside the schema
    /// are ignored.  `updated_at` moves to `now` (never before
    /// `created_at`), `created_at` is left alone.
    pub fn apply_update(&mut self, input: &EntryFields, now: DateTime<Utc>) {
        if let Some(title) = input.get("title") {
            self.title.clone_from(title);
        }

        for &name in self.entry_type.fields() {
            if let Some(value) = input.get(name) {
                self.fields.insert(name.to_string(), value.clone());
            }
        }

        self.updated_at = now.max(self.created_at);
    }

    /// Value of a type-dependent field, or `""` if it is absent.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map_or("", String::as_str)
    }

    /// The list projection of this entry: identity, timestamps, and a
    /// per-type summary that never includes secret values.
    pub fn preview(&self) -> EntryPreview {
        let mut summary = BTreeMap::new();
        let mut copy = |key: &str| {
            summary.insert(key.to_string(), self.field(key).to_string());
        };

        match self.entry_type {
            EntryType::Login => {
                copy("username");
                copy("url");
            }
            EntryType::Note => {}
            EntryType::CreditCard => copy("cardholder_name"),
            EntryType::Identity => {
                copy("full_name");
                copy("email");
            }
            EntryType::ApiCredential => copy("permissions"),
            EntryType::Database => {
                copy("host");
                copy("database_type");
            }
            EntryType::Server => {
                copy("ip_address");
                copy("hostname");
            }
            EntryType::SoftwareLicense => {
                copy("product");
                copy("expiry_date");
            }
            EntryType::SshKey => {
                copy("host");
                copy("username");
            }
            EntryType::Wifi => {
                copy("ssid");
                copy("security_type");
            }
            EntryType::BankAccount => copy("bank_name"),
        }

        match self.entry_type {
            EntryType::Note => {
                summary.insert("preview".into(), truncate_note(self.field("notes")));
            }
            EntryType::CreditCard => {
                summary.insert("card_last4".into(), last4(self.field("card_number")));
            }
            EntryType::BankAccount => {
                summary.insert("account_last4".into(), last4(self.field("account_number")));
            }
            _ => {}
        }

        EntryPreview {
            id: self.id.clone(),
            entry_type: self.entry_type,
            title: self.title.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            summary,
        }
    }
}

/// Non-sensitive summary of an entry, as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryPreview {
    pub id: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub summary: BTreeMap<String, String>,
}

fn truncate_note(notes: &str) -> String {
    if notes.chars().count() > NOTE_PREVIEW_CHARS {
        let head: String = notes.chars().take(NOTE_PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        notes.to_string()
    }
}

fn last4(number: &str) -> String {
    let count = number.chars().count();
    if count >= 4 {
        number.chars().skip(count - 4).collect()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn fields(pairs: &[(&str, &str)]) -> EntryFields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn new_entry_has_equal_timestamps_and_all_fields() {
        let now = Utc::now();
        let entry = Entry::new(
            EntryType::Login,
            &fields(&[("title", "Email"), ("username", "a@b.com")]),
            now,
        );

        assert_eq!(entry.created_at, entry.updated_at);
        assert_eq!(entry.title, "Email");
        assert_eq!(entry.field("username"), "a@b.com");
        assert_eq!(entry.field("password"), "");
        assert_eq!(entry.fields.len(), EntryType::Login.fields().len());
    }

    #[test]
    fn new_entry_ignores_unknown_fields() {
        let entry = Entry::new(
            EntryType::Note,
            &fields(&[("notes", "hi"), ("card_number", "4111")]),
            Utc::now(),
        );
        assert!(!entry.fields.contains_key("card_number"));
    }

    #[test]
    fn missing_title_is_empty() {
        let entry = Entry::new(EntryType::Wifi, &EntryFields::new(), Utc::now());
        assert_eq!(entry.title, "");
    }

    #[test]
    fn update_refreshes_updated_at_only() {
        let t0 = Utc::now();
        let mut entry = Entry::new(EntryType::Login, &fields(&[("password", "x")]), t0);
        let id = entry.id.clone();

        let t1 = t0 + Duration::seconds(30);
        entry.apply_update(&fields(&[("password", "y")]), t1);

        assert_eq!(entry.id, id);
        assert_eq!(entry.created_at, t0);
        assert_eq!(entry.updated_at, t1);
        assert_eq!(entry.field("password"), "y");
    }

    #[test]
    fn update_keeps_absent_fields_and_title() {
        let t0 = Utc::now();
        let mut entry = Entry::new(
            EntryType::Login,
            &fields(&[("title", "Bank"), ("username", "me")]),
            t0,
        );
        entry.apply_update(&fields(&[("url", "https://bank")]), t0);
        assert_eq!(entry.title, "Bank");
        assert_eq!(entry.field("username"), "me");
        assert_eq!(entry.field("url"), "https://bank");
    }

    #[test]
    fn update_ignores_fields_outside_schema() {
        let mut entry = Entry::new(EntryType::Note, &fields(&[("notes", "n")]), Utc::now());
        entry.apply_update(&fields(&[("password", "leak")]), Utc::now());
        assert!(!entry.fields.contains_key("password"));
        assert_eq!(entry.field("password"), "");
    }

    #[test]
    fn update_never_moves_before_created_at() {
        let t0 = Utc::now();
        let mut entry = Entry::new(EntryType::Note, &EntryFields::new(), t0);
        entry.apply_update(&EntryFields::new(), t0 - Duration::hours(1));
        assert_eq!(entry.updated_at, t0);
        assert!(entry.updated_at >= entry.created_at);
    }

    #[test]
    fn login_preview_hides_password() {
        let entry = Entry::new(
            EntryType::Login,
            &fields(&[("title", "Email"), ("username", "a@b.com"), ("password", "x")]),
            Utc::now(),
        );

        let preview = entry.preview();
        assert_eq!(preview.title, "Email");
        assert_eq!(preview.summary.get("username").unwrap(), "a@b.com");
        assert!(!preview.summary.contains_key("password"));

        let json = serde_json::to_value(&preview).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["type"], "login");

        let detail = serde_json::to_value(&entry).unwrap();
        assert_eq!(detail["password"], "x");
    }

    #[test]
    fn card_preview_shows_last_four() {
        let entry = Entry::new(
            EntryType::CreditCard,
            &fields(&[("card_number", "4111111111111234"), ("security_code", "999")]),
            Utc::now(),
        );
        let preview = entry.preview();
        assert_eq!(preview.summary["card_last4"], "1234");
        assert!(!preview.summary.contains_key("card_number"));
        assert!(!preview.summary.contains_key("security_code"));
    }

    #[test]
    fn short_account_number_has_no_last_four() {
        let entry = Entry::new(
            EntryType::BankAccount,
            &fields(&[("account_number", "12")]),
            Utc::now(),
        );
        assert_eq!(entry.preview().summary["account_last4"], "");
    }

    #[test]
    fn note_preview_is_truncated() {
        let long = "a".repeat(60);
        let entry = Entry::new(EntryType::Note, &fields(&[("notes", &long)]), Utc::now());
        let preview = entry.preview();
        assert_eq!(preview.summary["preview"], format!("{}...", "a".repeat(50)));

        let short = Entry::new(EntryType::Note, &fields(&[("notes", "short")]), Utc::now());
        assert_eq!(short.preview().summary["preview"], "short");
    }

    #[test]
    fn serializes_flat() {
        let entry = Entry::new(EntryType::Wifi, &fields(&[("ssid", "home")]), Utc::now());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "wifi");
        assert_eq!(json["ssid"], "home");
        assert!(json.get("fields").is_none());

        let back: Entry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
