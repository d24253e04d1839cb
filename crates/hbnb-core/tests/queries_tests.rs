#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{create, MemoryStorage};
use hbnb_core::queries::{
    amenities_sorted, cities_by_states, cities_of_state, places_sorted, states_sorted,
};
use hbnb_core::EntityKind;
use serde_json::json;

fn names(entities: &[hbnb_core::Entity]) -> Vec<&str> {
    entities.iter().filter_map(|e| e.get_str("name")).collect()
}

#[test]
fn test_state_cities_view_includes_new_city() {
    // GIVEN a state with no extra attributes
    let mut storage = MemoryStorage::default();
    let state = create(&mut storage, EntityKind::State, &[]);
    assert_eq!(storage.objects.len(), 1);

    // WHEN a city referencing it is created
    let city = create(
        &mut storage,
        EntityKind::City,
        &[("state_id", json!(state.id())), ("name", json!("Fresno"))],
    );

    // THEN the derived view contains it
    let cities = cities_of_state(&storage, state.id()).unwrap();
    assert_eq!(cities.len(), 1);
    assert_eq!(cities[0].id(), city.id());
}

#[test]
fn test_cities_of_unknown_state_is_empty() {
    let mut storage = MemoryStorage::default();
    create(&mut storage, EntityKind::City, &[("state_id", json!("nope"))]);

    assert!(cities_of_state(&storage, "missing").unwrap().is_empty());
}

#[test]
fn test_cities_by_states_sorted() {
    let mut storage = MemoryStorage::default();
    let ca = create(&mut storage, EntityKind::State, &[("name", json!("California"))]);
    let az = create(&mut storage, EntityKind::State, &[("name", json!("Arizona"))]);
    for (state, name) in [(&ca, "San Jose"), (&ca, "Fresno"), (&az, "Tempe")] {
        create(
            &mut storage,
            EntityKind::City,
            &[("state_id", json!(state.id())), ("name", json!(name))],
        );
    }

    let view = cities_by_states(&storage).unwrap();

    assert_eq!(view.len(), 2);
    assert_eq!(view[0].state.id(), az.id());
    assert_eq!(names(&view[0].cities), vec!["Tempe"]);
    assert_eq!(view[1].state.id(), ca.id());
    assert_eq!(names(&view[1].cities), vec!["Fresno", "San Jose"]);
}

#[test]
fn test_sorted_listings() {
    let mut storage = MemoryStorage::default();
    for name in ["Wifi", "Cable", "Pool"] {
        create(&mut storage, EntityKind::Amenity, &[("name", json!(name))]);
    }
    for name in ["Loft", "Cabin"] {
        create(&mut storage, EntityKind::Place, &[("name", json!(name))]);
    }
    create(&mut storage, EntityKind::State, &[("name", json!("Texas"))]);

    assert_eq!(names(&amenities_sorted(&storage).unwrap()), vec!["Cable", "Pool", "Wifi"]);
    assert_eq!(names(&places_sorted(&storage).unwrap()), vec!["Cabin", "Loft"]);
    assert_eq!(names(&states_sorted(&storage).unwrap()), vec!["Texas"]);
}
