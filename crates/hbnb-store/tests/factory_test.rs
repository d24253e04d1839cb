#![allow(clippy::unwrap_used, clippy::expect_used)]

use hbnb_core::errors::HbnbError;
use hbnb_core::{Entity, EntityKind};
use hbnb_store::{open_storage, DbConfig, StorageConfig, StorageKind};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_file_backend_is_reloaded_on_open() {
    let dir = TempDir::new().unwrap();
    let config = StorageConfig {
        file_path: dir.path().join("file.json"),
        ..StorageConfig::default()
    };

    let mut storage = open_storage(&config).unwrap();
    let mut state = Entity::new(EntityKind::State);
    state.set_attr("name", json!("Maine"));
    state.save(storage.as_mut()).unwrap();
    drop(storage);

    let reopened = open_storage(&config).unwrap();
    assert_eq!(
        reopened.get(EntityKind::State, state.id()).unwrap(),
        Some(state)
    );
}

#[test]
fn test_db_backend_opens_with_session() {
    let config = StorageConfig {
        kind: StorageKind::Db,
        db: DbConfig {
            database: ":memory:".to_string(),
            ..DbConfig::default()
        },
        env: Some("test".to_string()),
        ..StorageConfig::default()
    };

    let storage = open_storage(&config).unwrap();

    assert_eq!(storage.count(None).unwrap(), 0);
}

#[test]
fn test_corrupt_file_aborts_startup() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("file.json");
    fs::write(&path, r#"{"Spaceship.1": {"__class__": "Spaceship"}}"#).unwrap();
    let config = StorageConfig {
        file_path: path,
        ..StorageConfig::default()
    };

    let Err(err) = open_storage(&config) else {
        panic!("a corrupt document must abort startup");
    };

    assert!(matches!(err, HbnbError::CorruptStore { .. }));
}
