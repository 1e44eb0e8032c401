//! sea-orm backend tests against a temporary SQLite file

use std::sync::Arc;

use shortgate::config::DatabaseConfig;
use shortgate::storage::{LinkStore, StorageFactory, StoreError};
use tempfile::TempDir;

async fn sqlite_store(dir: &TempDir) -> Arc<dyn LinkStore> {
    let path = dir.path().join("links.db");
    let config = DatabaseConfig {
        database_url: format!("sqlite://{}", path.display()),
        ..Default::default()
    };
    StorageFactory::create(&config).await.unwrap()
}

#[tokio::test]
async fn test_sqlite_lifecycle() {
    let dir = TempDir::new().unwrap();
    let store = sqlite_store(&dir).await;
    assert_eq!(store.backend_name(), "sqlite");

    let saved = store.save("https://example.com", "abc123").await.unwrap();
    assert!(saved.id > 0);

    let fetched = store.get("abc123").await.unwrap();
    assert_eq!(fetched.target, "https://example.com");
    assert_eq!(fetched.id, saved.id);

    store.delete("abc123").await.unwrap();
    assert_eq!(
        store.get("abc123").await,
        Err(StoreError::NotFound("abc123".into()))
    );
    assert_eq!(
        store.delete("abc123").await,
        Err(StoreError::NotFound("abc123".into()))
    );
}

#[tokio::test]
async fn test_sqlite_unique_alias() {
    let dir = TempDir::new().unwrap();
    let store = sqlite_store(&dir).await;

    store.save("https://example.com", "dup").await.unwrap();
    assert_eq!(
        store.save("https://example.com", "dup").await,
        Err(StoreError::AliasConflict("dup".into()))
    );
    assert_eq!(
        store.save("https://other.example.com", "dup").await,
        Err(StoreError::AliasConflict("dup".into()))
    );
    assert_eq!(store.get("dup").await.unwrap().target, "https://example.com");
}

#[tokio::test]
async fn test_sqlite_concurrent_writers_single_winner() {
    let dir = TempDir::new().unwrap();
    let store = sqlite_store(&dir).await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.save(&format!("https://example.com/{}", i), "race").await
        }));
    }

    let mut wins = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => wins += 1,
            Err(StoreError::AliasConflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected store error: {}", other),
        }
    }
    assert_eq!(wins, 1);
    assert_eq!(conflicts, 7);
}

#[tokio::test]
async fn test_data_survives_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let store = sqlite_store(&dir).await;
        store.save("https://example.com/persist", "keep").await.unwrap();
    }

    let store = sqlite_store(&dir).await;
    assert_eq!(
        store.get("keep").await.unwrap().target,
        "https://example.com/persist"
    );
}

#[tokio::test]
async fn test_factory_selects_backend() {
    let memory = StorageFactory::create(&DatabaseConfig {
        database_url: "memory://".into(),
        ..Default::default()
    })
    .await
    .unwrap();
    assert_eq!(memory.backend_name(), "memory");

    for url in ["", "redis://localhost:6379"] {
        let result = StorageFactory::create(&DatabaseConfig {
            database_url: url.into(),
            ..Default::default()
        })
        .await;
        assert!(result.is_err(), "{:?} should be rejected", url);
    }
}
