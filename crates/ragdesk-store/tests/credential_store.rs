//! Integration tests for the credential store over real backends.

use std::path::PathBuf;

use ragdesk_store::{CredentialStore, FileStore, KeyValueStore, MemoryStore, UserInfo, keys};

fn scratch_file(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("ragdesk-credential-it-{}", std::process::id()))
        .join(format!("{name}.json"))
}

// =========================================================================
// File-backed session
// =========================================================================

#[test]
fn test_file_backed_session_survives_reopen() {
    let path = scratch_file("reopen");
    {
        let store = CredentialStore::new(FileStore::open(&path).unwrap());
        store.set_authorization("issued-by-idp").unwrap();
        store
            .set_user_info(UserInfo {
                role: Some("query".into()),
                name: Some("Ada".into()),
                ..Default::default()
            })
            .unwrap();
        store.set_language("en").unwrap();
    }

    // A new process (or a new tab) opening the same file.
    let reopened = CredentialStore::new(FileStore::open(&path).unwrap());
    assert_eq!(reopened.authorization().as_deref(), Some("issued-by-idp"));
    assert_eq!(reopened.user_info_object().name.as_deref(), Some("Ada"));
    assert!(reopened.is_simple_role());

    reopened.clear_all().unwrap();
    assert!(!reopened.has_authorization());
    assert_eq!(reopened.language().as_deref(), Some("en"));
}

#[test]
fn test_file_backend_uses_contract_key_names() {
    let path = scratch_file("keys");
    let backend = FileStore::open(&path).unwrap();
    let store = CredentialStore::new(FileStore::open(&path).unwrap());
    store.set_token("t").unwrap();
    store.set_authorization("a").unwrap();

    assert_eq!(backend.get(keys::TOKEN).as_deref(), Some("t"));
    assert_eq!(backend.get(keys::AUTHORIZATION).as_deref(), Some("a"));
}

// =========================================================================
// Shared storage across handles
// =========================================================================

#[test]
fn test_other_tab_logout_is_observed() {
    let shared = MemoryStore::new();
    let this_tab = CredentialStore::new(shared.clone());
    let other_tab = CredentialStore::new(shared);

    this_tab.set_authorization("abc").unwrap();
    assert!(other_tab.has_authorization());

    other_tab.clear_all().unwrap();
    assert!(!this_tab.has_authorization());
}
