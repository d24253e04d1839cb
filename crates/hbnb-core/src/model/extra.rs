use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Attributes assigned to an entity outside its declared schema
///
/// Kept beside the typed fields so a document round-trips attribute for
/// attribute even when it carries names the model does not know about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ExtraAttrs {
    data: BTreeMap<String, Value>,
}

impl ExtraAttrs {
    /// Create a new empty set of extra attributes
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    /// Get a value by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Set a value by name, replacing any previous value
    pub fn set(&mut self, name: String, value: Value) {
        self.data.insert(name, value);
    }

    /// Iterate name/value pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    /// Get the number of extra attributes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if there are no extra attributes
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Render as a JSON object (the relational backend's `extra` column)
    pub fn to_json_map(&self) -> Map<String, Value> {
        self.data
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl From<Map<String, Value>> for ExtraAttrs {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            data: map.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_and_get() {
        let mut extra = ExtraAttrs::new();
        assert!(extra.is_empty());

        extra.set("nickname".to_string(), json!("Betty"));
        assert_eq!(extra.get("nickname"), Some(&json!("Betty")));
        assert_eq!(extra.len(), 1);
    }

    #[test]
    fn test_iter_is_name_ordered() {
        let mut extra = ExtraAttrs::new();
        extra.set("zeta".to_string(), json!(1));
        extra.set("alpha".to_string(), json!(2));

        let names: Vec<&String> = extra.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_json_map_round_trip() {
        let mut extra = ExtraAttrs::new();
        extra.set("floors".to_string(), json!(3));

        let back = ExtraAttrs::from(extra.to_json_map());
        assert_eq!(back, extra);
    }
}
