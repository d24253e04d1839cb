use std::collections::BTreeMap;

use hbnb_core::{Entity, EntityKind, Result, Storage};
use serde_json::Value;

/// Storage that keeps everything in memory and counts saves
#[derive(Debug, Default)]
pub struct MemoryStorage {
    pub objects: BTreeMap<String, Entity>,
    pub saves: usize,
}

impl Storage for MemoryStorage {
    fn all(&self, kind: Option<EntityKind>) -> Result<BTreeMap<String, Entity>> {
        Ok(self
            .objects
            .iter()
            .filter(|(_, e)| kind.is_none_or(|k| e.kind() == k))
            .map(|(k, e)| (k.clone(), e.clone()))
            .collect())
    }

    fn new(&mut self, entity: &mut Entity) -> Result<()> {
        self.objects.insert(entity.key(), entity.clone());
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        self.saves += 1;
        Ok(())
    }

    fn delete(&mut self, entity: Option<&Entity>) -> Result<()> {
        if let Some(entity) = entity {
            self.objects.remove(&entity.key());
        }
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Create and save an entity with the given attributes
#[allow(dead_code)]
pub fn create(storage: &mut MemoryStorage, kind: EntityKind, attrs: &[(&str, Value)]) -> Entity {
    let mut entity = Entity::new(kind);
    for (name, value) in attrs {
        assert!(entity.set_attr(name, value.clone()).is_applied());
    }
    entity.save(storage).unwrap();
    entity
}
