//! File credential store behavior across store instances.

use chrono::{Duration, Utc};
use feedwatch_core::AccessCredential;
use feedwatch_store::{Config, CredentialStore, FileCredentialStore};

#[tokio::test]
async fn credential_survives_a_new_store_instance() {
    let dir = tempfile::tempdir().unwrap();
    let issued = AccessCredential::issued_at("fresh", Utc::now());

    FileCredentialStore::new(dir.path(), "avito")
        .save("Test Co", &issued)
        .await
        .unwrap();

    let reloaded = FileCredentialStore::new(dir.path(), "avito")
        .load("Test Co")
        .await;
    assert_eq!(reloaded, issued);
    assert!(reloaded.is_valid());
}

#[tokio::test]
async fn expired_credential_loads_but_is_not_valid() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path(), "avito");
    let expired = AccessCredential::new("old", Utc::now() - Duration::hours(1));

    store.save("Test Co", &expired).await.unwrap();

    let loaded = store.load("Test Co").await;
    assert_eq!(loaded.access_token, "old");
    assert!(!loaded.is_valid());
}

#[tokio::test]
async fn accounts_do_not_share_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path(), "avito");

    store
        .save("First", &AccessCredential::issued_at("one", Utc::now()))
        .await
        .unwrap();

    assert!(store.load("Second").await.is_empty());
    assert!(dir.path().join("avito_token_first.json").exists());
}

#[test]
fn config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "cian": { "accounts": [ { "name": "North", "token": "t" } ] },
             "diagnostics": { "enabled": true, "keep": true } }"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.cian.accounts[0].name, "North");
    assert!(config.diagnostics.enabled);
    assert!(config.diagnostics.keep);
    assert!(config.avito.accounts.is_empty());
}
