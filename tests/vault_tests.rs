//! Integration tests for the PassVault vault module.

use std::collections::HashSet;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::Value;

use passvault::crypto::{checksum, verify_checksum, KdfParams};
use passvault::errors::PassVaultError;
use passvault::vault::{read_dump, write_dump, StoredDump, Vault};
use tempfile::TempDir;

/// Low iteration count so the suite stays quick.
const FAST: KdfParams = KdfParams { iterations: 1_000 };

fn fast_vault(password: &str) -> Vault {
    Vault::init_with_params(password.as_bytes(), &FAST).expect("init vault")
}

/// Replace the first character of a base64 field with one outside the
/// alphabet.
fn corrupt_text(representation: &str, pointer: &str) -> String {
    let mut value: Value = serde_json::from_str(representation).unwrap();
    let field = value.pointer_mut(pointer).expect("field exists");
    let text = field.as_str().unwrap();
    *field = Value::String(format!("*{}", &text[1..]));
    serde_json::to_string_pretty(&value).unwrap()
}

/// Flip the low bit of byte `index` in a base64 field of the dump.
fn flip_byte(representation: &str, pointer: &str, index: usize) -> String {
    let mut value: Value = serde_json::from_str(representation).unwrap();
    let field = value.pointer_mut(pointer).expect("field exists");
    let mut bytes = BASE64.decode(field.as_str().unwrap()).unwrap();
    bytes[index] ^= 0x01;
    *field = Value::String(BASE64.encode(bytes));
    serde_json::to_string_pretty(&value).unwrap()
}

// ---------------------------------------------------------------------------
// End-to-end scenarios
// ---------------------------------------------------------------------------

#[test]
fn init_set_dump_load_get() {
    let mut vault = Vault::init(b"m4sterPW").expect("init");
    vault.set("example.com", "p@ss1").unwrap();

    let dump = vault.dump().unwrap();

    let reloaded = Vault::load(b"m4sterPW", &dump.representation).expect("load");
    assert_eq!(
        reloaded.get("example.com").unwrap().as_deref(),
        Some("p@ss1")
    );
}

#[test]
fn second_set_overwrites() {
    let mut vault = fast_vault("m4sterPW");
    vault.set("example.com", "first").unwrap();
    vault.set("example.com", "second").unwrap();

    assert_eq!(vault.len(), 1);
    assert_eq!(vault.get("example.com").unwrap().as_deref(), Some("second"));

    let reloaded = Vault::load(b"m4sterPW", &vault.dump().unwrap().representation).unwrap();
    assert_eq!(
        reloaded.get("example.com").unwrap().as_deref(),
        Some("second")
    );
}

#[test]
fn roundtrip_for_assorted_secrets() {
    let mut vault = fast_vault("m4sterPW");
    let long = "x".repeat(4096);
    let cases = [
        ("example.com", "p@ss1"),
        ("empty.example", ""),
        ("unicode.example", "pässwörd 🔑"),
        ("long.example", long.as_str()),
        ("", "empty domain name"),
    ];

    for (domain, secret) in cases {
        vault.set(domain, secret).unwrap();
    }
    for (domain, secret) in cases {
        assert_eq!(vault.get(domain).unwrap().as_deref(), Some(secret));
    }
}

#[test]
fn get_missing_domain_is_none() {
    let vault = fast_vault("m4sterPW");
    assert_eq!(vault.get("nowhere.example").unwrap(), None);
}

// ---------------------------------------------------------------------------
// Removal
// ---------------------------------------------------------------------------

#[test]
fn remove_absent_domain_returns_false_and_changes_nothing() {
    let mut vault = fast_vault("m4sterPW");
    vault.set("keep.example", "x").unwrap();
    let before = vault.dump().unwrap();

    assert!(!vault.remove("absent.example"));
    assert_eq!(vault.dump().unwrap(), before);
}

#[test]
fn remove_twice_returns_true_then_false() {
    let mut vault = fast_vault("m4sterPW");
    vault.set("example.com", "p@ss1").unwrap();

    assert!(vault.remove("example.com"));
    assert!(!vault.remove("example.com"));
    assert_eq!(vault.get("example.com").unwrap(), None);
    assert!(vault.is_empty());
}

// ---------------------------------------------------------------------------
// Master password checks on load
// ---------------------------------------------------------------------------

#[test]
fn load_with_wrong_password_fails_when_entries_exist() {
    let mut vault = fast_vault("m4sterPW");
    vault.set("example.com", "p@ss1").unwrap();
    let dump = vault.dump().unwrap();

    let result = Vault::load(b"wrongPW!", &dump.representation);
    assert!(matches!(result, Err(PassVaultError::InvalidMasterPassword)));
}

#[test]
fn load_with_wrong_password_succeeds_on_empty_vault() {
    // Nothing to probe: an empty vault cannot tell a wrong password apart.
    let vault = fast_vault("m4sterPW");
    let dump = vault.dump().unwrap();

    let reopened = Vault::load(b"wrongPW!", &dump.representation).expect("no probe entry");
    assert!(reopened.is_empty());
}

#[test]
fn empty_vault_opened_with_wrong_password_cannot_read_later_entries() {
    let original = fast_vault("m4sterPW");
    let dump = original.dump().unwrap();

    // A wrong-password session writes under its own key...
    let mut wrong = Vault::load(b"wrongPW!", &dump.representation).unwrap();
    wrong.set("b.example", "y").unwrap();

    // ...so the right password no longer opens what it dumps.
    let result = Vault::load(b"m4sterPW", &wrong.dump().unwrap().representation);
    assert!(matches!(result, Err(PassVaultError::InvalidMasterPassword)));
}

#[test]
fn load_keeps_salt_and_iterations() {
    let vault = fast_vault("m4sterPW");
    let reloaded = Vault::load(b"m4sterPW", &vault.dump().unwrap().representation).unwrap();

    assert_eq!(reloaded.salt(), vault.salt());
    assert_eq!(reloaded.salt().len(), 16);
    assert_eq!(reloaded.kdf_params(), FAST);
}

// ---------------------------------------------------------------------------
// Tamper detection
// ---------------------------------------------------------------------------

#[test]
fn flipped_ciphertext_byte_fails_decryption() {
    let mut vault = fast_vault("m4sterPW");
    vault.set("a.example", "probe").unwrap();
    vault.set("z.example", "p@ss1").unwrap();
    let dump = vault.dump().unwrap();

    let ciphertext_len = vault.entry("z.example").unwrap().data_bytes().unwrap().len();
    for index in 0..ciphertext_len {
        let tampered = flip_byte(
            &dump.representation,
            "/kvs/z.example/encryptedData/data",
            index,
        );
        // "a.example" sorts first and is the untouched password probe.
        let reloaded = Vault::load(b"m4sterPW", &tampered).unwrap();
        assert!(
            matches!(
                reloaded.get("z.example"),
                Err(PassVaultError::DecryptionFailed)
            ),
            "byte {index}"
        );
        assert_eq!(reloaded.get("a.example").unwrap().as_deref(), Some("probe"));
    }
}

#[test]
fn flipped_iv_byte_fails_decryption() {
    let mut vault = fast_vault("m4sterPW");
    vault.set("a.example", "probe").unwrap();
    vault.set("z.example", "p@ss1").unwrap();

    let tampered = flip_byte(
        &vault.dump().unwrap().representation,
        "/kvs/z.example/encryptedData/iv",
        0,
    );
    let reloaded = Vault::load(b"m4sterPW", &tampered).unwrap();
    assert!(matches!(
        reloaded.get("z.example"),
        Err(PassVaultError::DecryptionFailed)
    ));
}

#[test]
fn flipped_hmac_byte_fails_integrity_check() {
    let mut vault = fast_vault("m4sterPW");
    vault.set("a.example", "probe").unwrap();
    vault.set("z.example", "p@ss1").unwrap();
    let dump = vault.dump().unwrap();

    for index in 0..32 {
        let tampered = flip_byte(&dump.representation, "/kvs/z.example/hmac", index);
        let reloaded = Vault::load(b"m4sterPW", &tampered).unwrap();
        assert!(
            matches!(
                reloaded.get("z.example"),
                Err(PassVaultError::IntegrityCheckFailed)
            ),
            "byte {index}"
        );
    }
}

#[test]
fn undecodable_entry_only_breaks_that_entry() {
    let mut vault = fast_vault("m4sterPW");
    vault.set("a.example", "probe").unwrap();
    vault.set("z.example", "p@ss1").unwrap();
    let dump = vault.dump().unwrap();

    let cases = [
        ("/kvs/z.example/encryptedData/iv", true),
        ("/kvs/z.example/encryptedData/data", true),
        ("/kvs/z.example/hmac", false),
    ];
    for (pointer, decryption) in cases {
        let tampered = corrupt_text(&dump.representation, pointer);
        let reloaded = Vault::load(b"m4sterPW", &tampered).unwrap();

        assert_eq!(reloaded.get("a.example").unwrap().as_deref(), Some("probe"));
        let result = reloaded.get("z.example");
        if decryption {
            assert!(
                matches!(result, Err(PassVaultError::DecryptionFailed)),
                "{pointer}"
            );
        } else {
            assert!(
                matches!(result, Err(PassVaultError::IntegrityCheckFailed)),
                "{pointer}"
            );
        }
    }
}

#[test]
fn undecodable_probe_entry_is_reported_as_invalid_password() {
    let mut vault = fast_vault("m4sterPW");
    vault.set("a.example", "probe").unwrap();
    vault.set("z.example", "p@ss1").unwrap();

    let tampered = corrupt_text(
        &vault.dump().unwrap().representation,
        "/kvs/a.example/encryptedData/data",
    );
    assert!(matches!(
        Vault::load(b"m4sterPW", &tampered),
        Err(PassVaultError::InvalidMasterPassword)
    ));
}

#[test]
fn huge_iteration_count_in_dump_is_rejected() {
    let vault = fast_vault("m4sterPW");
    let mut value: Value = serde_json::from_str(&vault.dump().unwrap().representation).unwrap();
    value["iterations"] = Value::from(4_294_967_295u32);

    assert!(matches!(
        Vault::load(b"m4sterPW", &value.to_string()),
        Err(PassVaultError::MalformedDump(_))
    ));
}

#[test]
fn tampered_probe_entry_is_reported_as_invalid_password() {
    let mut vault = fast_vault("m4sterPW");
    vault.set("a.example", "probe").unwrap();

    let tampered = flip_byte(
        &vault.dump().unwrap().representation,
        "/kvs/a.example/hmac",
        3,
    );
    assert!(matches!(
        Vault::load(b"m4sterPW", &tampered),
        Err(PassVaultError::InvalidMasterPassword)
    ));
}

#[test]
fn entry_copied_from_another_vault_is_rejected() {
    let mut ours = fast_vault("m4sterPW");
    ours.set("a.example", "probe").unwrap();
    ours.set("z.example", "mine").unwrap();

    let mut theirs = fast_vault("otherPW!");
    theirs.set("z.example", "theirs").unwrap();

    let mut value: Value = serde_json::from_str(&ours.dump().unwrap().representation).unwrap();
    let foreign: Value = serde_json::from_str(&theirs.dump().unwrap().representation).unwrap();
    value["kvs"]["z.example"] = foreign["kvs"]["z.example"].clone();

    let reloaded = Vault::load(b"m4sterPW", &value.to_string()).unwrap();
    assert!(reloaded.get("z.example").is_err());
}

// ---------------------------------------------------------------------------
// IVs
// ---------------------------------------------------------------------------

#[test]
fn thousand_sets_never_repeat_an_iv() {
    let mut vault = fast_vault("m4sterPW");
    let mut seen = HashSet::new();

    for i in 0..1_000 {
        let domain = format!("site{i}.example");
        vault.set(&domain, "same secret").unwrap();
        let iv = vault.entry(&domain).unwrap().iv_bytes().unwrap();
        assert_eq!(iv.len(), 12);
        assert!(seen.insert(iv), "IV repeated at set #{i}");
    }
}

#[test]
fn overwriting_a_domain_draws_a_new_iv() {
    let mut vault = fast_vault("m4sterPW");
    vault.set("example.com", "p@ss1").unwrap();
    let first = vault.entry("example.com").unwrap().clone();
    vault.set("example.com", "p@ss1").unwrap();
    let second = vault.entry("example.com").unwrap();

    assert_ne!(first.encrypted_data.iv, second.encrypted_data.iv);
    assert_eq!(first.hmac, second.hmac);
}

// ---------------------------------------------------------------------------
// Dump format and checksum
// ---------------------------------------------------------------------------

#[test]
fn dump_has_expected_shape_and_no_key() {
    let mut vault = Vault::init(b"m4sterPW").unwrap();
    vault.set("example.com", "p@ss1").unwrap();
    let dump = vault.dump().unwrap();

    let value: Value = serde_json::from_str(&dump.representation).unwrap();
    let top: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(top.len(), 2);
    assert!(value["salt"].is_string());

    let entry = value["kvs"]["example.com"].as_object().unwrap();
    assert_eq!(entry.len(), 2);
    assert!(entry.contains_key("encryptedData"));
    assert!(entry.contains_key("hmac"));
    assert!(!dump.representation.contains("p@ss1"));
}

#[test]
fn checksum_matches_representation_and_is_stable() {
    let mut vault = fast_vault("m4sterPW");
    vault.set("example.com", "p@ss1").unwrap();

    let first = vault.dump().unwrap();
    let second = vault.dump().unwrap();

    assert_eq!(first.checksum, checksum(&first.representation));
    assert_eq!(first, second);
    assert_eq!(first.checksum.len(), 64);
    assert!(verify_checksum(&first.representation, &first.checksum).is_ok());
}

#[test]
fn checksum_changes_after_mutation() {
    let mut vault = fast_vault("m4sterPW");
    let before = vault.dump().unwrap();
    vault.set("example.com", "p@ss1").unwrap();
    let after = vault.dump().unwrap();

    assert_ne!(before.checksum, after.checksum);
    assert!(matches!(
        verify_checksum(&after.representation, &before.checksum),
        Err(PassVaultError::ChecksumMismatch)
    ));
}

#[test]
fn load_rejects_malformed_dump() {
    assert!(matches!(
        Vault::load(b"m4sterPW", "{ not json"),
        Err(PassVaultError::MalformedDump(_))
    ));
}

#[test]
fn load_rejects_dump_without_salt() {
    assert!(matches!(
        Vault::load(b"m4sterPW", r#"{ "kvs": {} }"#),
        Err(PassVaultError::MissingSalt)
    ));
}

// ---------------------------------------------------------------------------
// Persistence through the file helpers
// ---------------------------------------------------------------------------

#[test]
fn dump_written_to_disk_reloads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("password_dump.json");

    let mut vault = fast_vault("m4sterPW");
    vault.set("example.com", "p@ss1").unwrap();
    let dump = vault.dump().unwrap();
    write_dump(&path, &dump.representation).unwrap();

    let StoredDump::Present(text) = read_dump(&path).unwrap() else {
        panic!("dump should be on disk");
    };
    assert_eq!(checksum(&text), dump.checksum);

    let reloaded = Vault::load(b"m4sterPW", &text).unwrap();
    assert_eq!(
        reloaded.get("example.com").unwrap().as_deref(),
        Some("p@ss1")
    );
}

#[test]
fn domains_are_sorted() {
    let mut vault = fast_vault("m4sterPW");
    vault.set("zeta.example", "z").unwrap();
    vault.set("alpha.example", "a").unwrap();
    vault.set("mid.example", "m").unwrap();

    assert_eq!(
        vault.domains(),
        vec!["alpha.example", "mid.example", "zeta.example"]
    );
    assert!(vault.contains("mid.example"));
    assert!(!vault.contains("other.example"));
}

#[test]
fn vault_can_be_shared_behind_a_mutex() {
    use std::sync::{Arc, Mutex};

    let vault = Arc::new(Mutex::new(fast_vault("m4sterPW")));
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let vault = Arc::clone(&vault);
            std::thread::spawn(move || {
                for i in 0..10 {
                    vault
                        .lock()
                        .unwrap()
                        .set(&format!("t{t}-{i}.example"), "x")
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(vault.lock().unwrap().len(), 40);
}
