//! Integration tests for the vault envelope: confidentiality, integrity,
//! and the list/detail projections of decrypted entries.

use std::time::Instant;

use chrono::Utc;
use secretvault::crypto::{KdfParams, SALT_LEN};
use secretvault::errors::VaultError;
use secretvault::vault::{
    CodecConfig, EntryFields, EntryType, Vault, VaultCodec, ENVELOPE_HEADER_LEN,
};

fn fast_codec() -> VaultCodec {
    VaultCodec::new(CodecConfig {
        kdf: KdfParams {
            memory_kib: 8_192,
            iterations: 1,
            parallelism: 1,
        },
    })
    .expect("valid params")
}

fn fields(pairs: &[(&str, &str)]) -> EntryFields {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn sample_vault() -> Vault {
    let mut vault = Vault::empty();
    vault.add_entry(
        EntryType::Login,
        &fields(&[
            ("title", "Email"),
            ("url", "https://mail.example.com"),
            ("username", "alice"),
            ("password", "hunter2"),
        ]),
        Utc::now(),
    );
    vault.add_entry(
        EntryType::Note,
        &fields(&[("title", "Diary"), ("notes", "dear diary")]),
        Utc::now(),
    );
    vault
}

// ---------------------------------------------------------------------------
// Round-trip and freshness
// ---------------------------------------------------------------------------

#[test]
fn roundtrip_preserves_vault() {
    let codec = fast_codec();
    let vault = sample_vault();

    let envelope = codec.encrypt(&vault, "correctpassword").unwrap();
    let decrypted = codec.decrypt(&envelope, "correctpassword").unwrap();

    assert_eq!(decrypted, vault);
}

#[test]
fn empty_vault_roundtrips() {
    let codec = fast_codec();
    let envelope = codec.encrypt(&Vault::empty(), "pw").unwrap();
    let vault = codec.decrypt(&envelope, "pw").unwrap();
    assert_eq!(vault.version, 1);
    assert!(vault.entries.is_empty());
}

#[test]
fn every_encryption_uses_fresh_salt_and_nonce() {
    let codec = fast_codec();
    let vault = sample_vault();

    let a = codec.encrypt(&vault, "pw").unwrap();
    let b = codec.encrypt(&vault, "pw").unwrap();

    assert_ne!(a[..16], b[..16], "salt reused");
    assert_ne!(a[16..28], b[16..28], "nonce reused");
    assert_ne!(a, b);
}

#[test]
fn envelope_contains_no_plaintext() {
    let codec = fast_codec();
    let envelope = codec.encrypt(&sample_vault(), "pw").unwrap();
    let haystack = String::from_utf8_lossy(&envelope);
    assert!(!haystack.contains("hunter2"));
    assert!(!haystack.contains("alice"));
}

// ---------------------------------------------------------------------------
// Integrity
// ---------------------------------------------------------------------------

#[test]
fn wrong_password_is_a_decrypt_failure() {
    let codec = VaultCodec::default();
    let envelope = codec.encrypt(&sample_vault(), "correctpassword").unwrap();

    let err = codec.decrypt(&envelope, "wrongpassword").unwrap_err();
    assert!(matches!(err, VaultError::DecryptFailure));
}

#[test]
fn flipping_salt_or_nonce_is_detected() {
    let codec = fast_codec();
    let envelope = codec.encrypt(&sample_vault(), "pw").unwrap();

    for index in [0, SALT_LEN - 1, SALT_LEN, ENVELOPE_HEADER_LEN - 1] {
        let mut tampered = envelope.clone();
        tampered[index] ^= 0x01;
        assert!(
            matches!(codec.decrypt(&tampered, "pw"), Err(VaultError::DecryptFailure)),
            "flip at byte {index} went unnoticed"
        );
    }
}

#[test]
fn flipping_any_ciphertext_bit_is_detected() {
    let codec = fast_codec();
    let envelope = codec.encrypt(&Vault::empty(), "pw").unwrap();

    // Ciphertext body and tag, every bit.
    for index in ENVELOPE_HEADER_LEN..envelope.len() {
        for bit in 0..8 {
            let mut tampered = envelope.clone();
            tampered[index] ^= 1 << bit;
            assert!(
                matches!(codec.decrypt(&tampered, "pw"), Err(VaultError::DecryptFailure)),
                "flip of bit {bit} in byte {index} went unnoticed"
            );
        }
    }
}

#[test]
fn truncated_envelopes_fail() {
    let codec = fast_codec();
    let envelope = codec.encrypt(&sample_vault(), "pw").unwrap();

    for len in [0, 10, ENVELOPE_HEADER_LEN - 1, ENVELOPE_HEADER_LEN, envelope.len() - 1] {
        assert!(
            matches!(codec.decrypt(&envelope[..len], "pw"), Err(VaultError::DecryptFailure)),
            "truncation to {len} bytes accepted"
        );
    }
}

#[test]
fn short_envelope_is_rejected_before_key_derivation() {
    let codec = VaultCodec::default();

    // 28 bytes is the shortest input that gets as far as Argon2id.
    let started = Instant::now();
    let err = codec.decrypt(&[0u8; ENVELOPE_HEADER_LEN], "pw").unwrap_err();
    let with_kdf = started.elapsed();
    assert!(matches!(err, VaultError::DecryptFailure));

    let started = Instant::now();
    for _ in 0..50 {
        let err = codec
            .decrypt(&[0u8; ENVELOPE_HEADER_LEN - 1], "pw")
            .unwrap_err();
        assert!(matches!(err, VaultError::DecryptFailure));
    }
    let without_kdf = started.elapsed();

    assert!(
        without_kdf * 10 < with_kdf,
        "50 short decrypts took {without_kdf:?}, one 28-byte decrypt took {with_kdf:?}"
    );
}

#[test]
fn appended_bytes_fail() {
    let codec = fast_codec();
    let mut envelope = codec.encrypt(&sample_vault(), "pw").unwrap();
    envelope.push(0);
    assert!(matches!(codec.decrypt(&envelope, "pw"), Err(VaultError::DecryptFailure)));
}

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

#[test]
fn login_list_projection_hides_password() {
    let codec = fast_codec();
    let envelope = codec.encrypt(&sample_vault(), "pw").unwrap();
    let vault = codec.decrypt(&envelope, "pw").unwrap();

    let previews = vault.previews();
    let login = previews
        .iter()
        .find(|p| p.entry_type == EntryType::Login)
        .expect("login preview");

    assert_eq!(login.title, "Email");
    assert_eq!(login.summary["username"], "alice");
    assert_eq!(login.summary["url"], "https://mail.example.com");
    assert!(!login.summary.contains_key("password"));

    let json = serde_json::to_string(&previews).unwrap();
    assert!(!json.contains("hunter2"));
}

#[test]
fn login_detail_exposes_password() {
    let codec = fast_codec();
    let vault = sample_vault();
    let id = vault.entries[0].id.clone();

    let envelope = codec.encrypt(&vault, "pw").unwrap();
    let decrypted = codec.decrypt(&envelope, "pw").unwrap();
    let entry = decrypted.get(&id).unwrap();

    assert_eq!(entry.field("password"), "hunter2");
    assert_eq!(entry.field("username"), "alice");
}
