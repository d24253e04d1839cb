#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{create, MemoryStorage};
use hbnb_core::{Entity, EntityKind, Storage};
use serde_json::json;

#[test]
fn test_save_registers_and_persists() {
    let mut storage = MemoryStorage::default();
    let mut state = Entity::new(EntityKind::State);
    state.set_attr("name", json!("California"));

    state.save(&mut storage).unwrap();

    assert_eq!(storage.saves, 1);
    let stored = storage.get(EntityKind::State, state.id()).unwrap();
    assert_eq!(stored, Some(state));
}

#[test]
fn test_save_refreshes_updated_at_only() {
    let mut storage = MemoryStorage::default();
    let mut state = create(&mut storage, EntityKind::State, &[("name", json!("Nevada"))]);
    let created = state.created_at();
    let first_update = state.updated_at();

    state.set_attr("name", json!("Utah"));
    state.save(&mut storage).unwrap();

    assert_eq!(state.created_at(), created);
    assert!(state.updated_at() >= first_update);
    let stored = storage.get(EntityKind::State, state.id()).unwrap().unwrap();
    assert_eq!(stored.get("name"), Some(&json!("Utah")));
}

#[test]
fn test_count_after_creates() {
    let mut storage = MemoryStorage::default();
    for i in 0..5 {
        create(&mut storage, EntityKind::Amenity, &[("name", json!(format!("a{}", i)))]);
    }
    create(&mut storage, EntityKind::User, &[]);

    assert_eq!(storage.count(Some(EntityKind::Amenity)).unwrap(), 5);
    assert_eq!(storage.count(Some(EntityKind::User)).unwrap(), 1);
    assert_eq!(storage.count(None).unwrap(), 6);
}

#[test]
fn test_delete_removes_entity() {
    let mut storage = MemoryStorage::default();
    let city = create(&mut storage, EntityKind::City, &[("name", json!("Reno"))]);

    city.delete(&mut storage).unwrap();

    assert_eq!(storage.get(EntityKind::City, city.id()).unwrap(), None);
}

#[test]
fn test_get_does_not_cross_kinds() {
    let mut storage = MemoryStorage::default();
    let state = create(&mut storage, EntityKind::State, &[]);

    assert!(storage.get(EntityKind::City, state.id()).unwrap().is_none());
}

#[test]
fn test_extra_attributes_survive_payload_round_trip() {
    let mut place = Entity::new(EntityKind::Place);
    place.set_attr("name", json!("Loft"));
    place.set_attr("amenity_ids", json!(["a1", "a2"]));
    place.set_attr("view", json!("ocean"));

    let back = Entity::from_payload(EntityKind::Place, place.to_dict()).unwrap();

    assert_eq!(back, place);
    assert_eq!(back.extra().get("view"), Some(&json!("ocean")));
}
