//! Index specifications: ordered field paths with directions.

use serde::{Deserialize, Serialize};

/// Per-field sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    /// Parses the conventional numeric form (1 / -1)
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            1 => Some(Direction::Ascending),
            -1 => Some(Direction::Descending),
            _ => None,
        }
    }

    /// Returns the conventional numeric form
    pub fn as_i32(&self) -> i32 {
        match self {
            Direction::Ascending => 1,
            Direction::Descending => -1,
        }
    }
}

/// Ordered (field path, direction) list defining an index.
///
/// Field paths may contain `.` for nested traversal. The spec is created
/// by the index-management layer and consumed read-only here; field order
/// is significant and defines the produced key's field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSpec {
    fields: Vec<(String, Direction)>,
}

impl IndexSpec {
    /// Starts an empty spec
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Appends an ascending field
    pub fn asc(self, path: impl Into<String>) -> Self {
        self.field(path, Direction::Ascending)
    }

    /// Appends a descending field
    pub fn desc(self, path: impl Into<String>) -> Self {
        self.field(path, Direction::Descending)
    }

    /// Appends a field with an explicit direction
    pub fn field(mut self, path: impl Into<String>, direction: Direction) -> Self {
        self.fields.push((path.into(), direction));
        self
    }

    /// Parses the conventional JSON form `{"name": 1, "age": -1}`.
    ///
    /// Field order is preserved. Returns None for non-objects, empty
    /// objects, or direction values other than 1 / -1.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let map = value.as_object()?;
        if map.is_empty() {
            return None;
        }
        let mut spec = Self::new();
        for (path, direction) in map {
            let direction = Direction::from_i64(direction.as_i64()?)?;
            spec = spec.field(path, direction);
        }
        Some(spec)
    }

    /// Renders the conventional JSON form, the inverse of `from_json`.
    ///
    /// Used when index metadata is persisted or reported back to clients.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (path, direction) in &self.fields {
            map.insert(path.clone(), serde_json::Value::from(direction.as_i32()));
        }
        serde_json::Value::Object(map)
    }

    /// Returns the ordered (path, direction) pairs
    pub fn fields(&self) -> &[(String, Direction)] {
        &self.fields
    }

    /// Iterates the field paths in spec order
    pub fn field_paths(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(path, _)| path.as_str())
    }

    /// Returns the directions in spec order
    pub fn directions(&self) -> Vec<Direction> {
        self.fields.iter().map(|(_, direction)| *direction).collect()
    }

    /// Number of indexed fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no fields are defined
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for IndexSpec {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_order() {
        let spec = IndexSpec::new().asc("name").desc("age");
        assert_eq!(
            spec.fields(),
            &[
                ("name".to_string(), Direction::Ascending),
                ("age".to_string(), Direction::Descending),
            ]
        );
    }

    #[test]
    fn test_from_json_preserves_order() {
        let spec = IndexSpec::from_json(&json!({"z": 1, "a": -1})).unwrap();
        let paths: Vec<_> = spec.field_paths().collect();
        assert_eq!(paths, vec!["z", "a"]);
        assert_eq!(spec.directions(), vec![Direction::Ascending, Direction::Descending]);
    }

    #[test]
    fn test_from_json_rejects_bad_direction() {
        assert!(IndexSpec::from_json(&json!({"a": 2})).is_none());
        assert!(IndexSpec::from_json(&json!({"a": "asc"})).is_none());
        assert!(IndexSpec::from_json(&json!({})).is_none());
        assert!(IndexSpec::from_json(&json!([1])).is_none());
    }

    #[test]
    fn test_json_form_roundtrips() {
        let definition = json!({"name": 1, "profile.age": -1});
        let spec = IndexSpec::from_json(&definition).unwrap();
        assert_eq!(spec.to_json(), definition);

        assert_eq!(Direction::Ascending.as_i32(), 1);
        assert_eq!(Direction::Descending.as_i32(), -1);
    }

    #[test]
    fn test_serde_roundtrip() {
        let spec = IndexSpec::new().asc("name").desc("profile.age");
        let encoded = serde_json::to_string(&spec).unwrap();
        let decoded: IndexSpec = serde_json::from_str(&encoded).unwrap();
        assert_eq!(spec, decoded);
    }
}
