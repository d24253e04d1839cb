//! Read-only views over a storage
//!
//! These are what a rendering front end asks for. Nothing here writes.
//! Relationships are derived by scanning, so every call is O(n) in the
//! number of live entities of the scanned kind.

use crate::errors::Result;
use crate::model::{Entity, EntityKind};
use crate::storage::Storage;

fn sorted_by_name(mut entities: Vec<Entity>) -> Vec<Entity> {
    entities.sort_by(|a, b| {
        let left = a.get_str("name").unwrap_or_default();
        let right = b.get_str("name").unwrap_or_default();
        left.cmp(right).then_with(|| a.id().cmp(b.id()))
    });
    entities
}

fn sorted_of_kind(storage: &dyn Storage, kind: EntityKind) -> Result<Vec<Entity>> {
    let entities = storage.all(Some(kind))?.into_values().collect();
    Ok(sorted_by_name(entities))
}

/// Every State, sorted by name
///
/// # Errors
///
/// Propagates the storage's read failure.
pub fn states_sorted(storage: &dyn Storage) -> Result<Vec<Entity>> {
    sorted_of_kind(storage, EntityKind::State)
}

/// Every City whose `state_id` equals `state_id`, sorted by name
///
/// # Errors
///
/// Propagates the storage's read failure.
pub fn cities_of_state(storage: &dyn Storage, state_id: &str) -> Result<Vec<Entity>> {
    let cities = storage
        .all(Some(EntityKind::City))?
        .into_values()
        .filter(|city| city.get_str("state_id") == Some(state_id))
        .collect();
    Ok(sorted_by_name(cities))
}

/// A State with its derived cities
#[derive(Debug, Clone, PartialEq)]
pub struct StateCities {
    pub state: Entity,
    pub cities: Vec<Entity>,
}

/// Every State sorted by name, each with its cities sorted by name
///
/// # Errors
///
/// Propagates the storage's read failure.
pub fn cities_by_states(storage: &dyn Storage) -> Result<Vec<StateCities>> {
    let cities: Vec<Entity> = storage.all(Some(EntityKind::City))?.into_values().collect();
    let cities = sorted_by_name(cities);

    Ok(states_sorted(storage)?
        .into_iter()
        .map(|state| {
            let cities = cities
                .iter()
                .filter(|city| city.get_str("state_id") == Some(state.id()))
                .cloned()
                .collect();
            StateCities { state, cities }
        })
        .collect())
}

/// Every Amenity, sorted by name
///
/// # Errors
///
/// Propagates the storage's read failure.
pub fn amenities_sorted(storage: &dyn Storage) -> Result<Vec<Entity>> {
    sorted_of_kind(storage, EntityKind::Amenity)
}

/// Every Place, sorted by name
///
/// # Errors
///
/// Propagates the storage's read failure.
pub fn places_sorted(storage: &dyn Storage) -> Result<Vec<Entity>> {
    sorted_of_kind(storage, EntityKind::Place)
}
