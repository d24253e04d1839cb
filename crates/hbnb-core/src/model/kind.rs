use std::fmt;
use std::str::FromStr;

use crate::errors::HbnbError;

/// Closed set of entity classes
///
/// The class name doubles as the `__class__` discriminator in persisted
/// documents and as the prefix of every composite key (`"City.<id>"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    BaseModel,
    User,
    State,
    City,
    Amenity,
    Place,
    Review,
}

impl EntityKind {
    /// Every kind, in the order the interpreter lists them
    pub const ALL: [EntityKind; 7] = [
        EntityKind::BaseModel,
        EntityKind::User,
        EntityKind::State,
        EntityKind::City,
        EntityKind::Amenity,
        EntityKind::Place,
        EntityKind::Review,
    ];

    /// Class name as written in commands and documents
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::BaseModel => "BaseModel",
            EntityKind::User => "User",
            EntityKind::State => "State",
            EntityKind::City => "City",
            EntityKind::Amenity => "Amenity",
            EntityKind::Place => "Place",
            EntityKind::Review => "Review",
        }
    }

    /// Relational table backing this kind; `BaseModel` has none
    pub fn table(&self) -> Option<&'static str> {
        match self {
            EntityKind::BaseModel => None,
            EntityKind::User => Some("users"),
            EntityKind::State => Some("states"),
            EntityKind::City => Some("cities"),
            EntityKind::Amenity => Some("amenities"),
            EntityKind::Place => Some("places"),
            EntityKind::Review => Some("reviews"),
        }
    }

    /// Build the composite key `"<Class>.<id>"`
    pub fn key_for(&self, id: &str) -> String {
        format!("{}.{}", self.as_str(), id)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = HbnbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| HbnbError::UnknownClass {
                class_name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_names() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.as_str().parse::<EntityKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let err = "city".parse::<EntityKind>().unwrap_err();
        assert_eq!(
            err,
            HbnbError::UnknownClass {
                class_name: "city".to_string()
            }
        );
    }

    #[test]
    fn test_key_for() {
        assert_eq!(EntityKind::Place.key_for("abc"), "Place.abc");
    }

    #[test]
    fn test_base_model_has_no_table() {
        assert!(EntityKind::BaseModel.table().is_none());
        assert_eq!(EntityKind::Amenity.table(), Some("amenities"));
    }
}
