//! Custom node properties
//!
//! Authoring tools attach free-form key/value properties to objects. Values
//! keep their original type; lookups never coerce between types.

use std::collections::BTreeMap;
use serde::Deserialize;

/// A single custom property value
///
/// Untagged so dumps can write plain values (`"door"`, `3`, `1.5`, `true`).
/// Variant order matters: integers must be tried before floats.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self {
        MetaValue::Str(s.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(s: String) -> Self {
        MetaValue::Str(s)
    }
}

impl From<i64> for MetaValue {
    fn from(v: i64) -> Self {
        MetaValue::Int(v)
    }
}

impl From<f64> for MetaValue {
    fn from(v: f64) -> Self {
        MetaValue::Float(v)
    }
}

impl From<bool> for MetaValue {
    fn from(v: bool) -> Self {
        MetaValue::Bool(v)
    }
}

/// Typed extraction from a [`MetaValue`]
///
/// Returns `None` when the stored value has a different type.
pub trait FromMetaValue: Sized {
    fn from_meta(value: &MetaValue) -> Option<Self>;
}

impl FromMetaValue for String {
    fn from_meta(value: &MetaValue) -> Option<Self> {
        match value {
            MetaValue::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromMetaValue for i64 {
    fn from_meta(value: &MetaValue) -> Option<Self> {
        match value {
            MetaValue::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromMetaValue for f64 {
    fn from_meta(value: &MetaValue) -> Option<Self> {
        match value {
            MetaValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromMetaValue for bool {
    fn from_meta(value: &MetaValue) -> Option<Self> {
        match value {
            MetaValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

/// Custom properties of one node, sorted by key
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, MetaValue>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetaValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.0.get(key)
    }

    /// Look up a property with the expected type
    ///
    /// `None` if the key is missing or holds a value of another type.
    pub fn get_optional<T: FromMetaValue>(&self, key: &str) -> Option<T> {
        self.0.get(key).and_then(T::from_meta)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetaValue)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<MetaValue>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_lookup() {
        let meta: Metadata = [("animatable", MetaValue::from("door_anim")), ("count", MetaValue::from(3i64))]
            .into_iter()
            .collect();

        assert_eq!(meta.get_optional::<String>("animatable"), Some("door_anim".to_string()));
        assert_eq!(meta.get_optional::<i64>("count"), Some(3));
        assert_eq!(meta.get_optional::<String>("missing"), None);
    }

    #[test]
    fn test_no_coercion() {
        let mut meta = Metadata::new();
        meta.insert("interaction", 7i64);
        meta.insert("ratio", 0.5f64);

        assert!(meta.contains_key("interaction"));
        assert_eq!(meta.get_optional::<String>("interaction"), None);
        assert_eq!(meta.get_optional::<f64>("interaction"), None);
        assert_eq!(meta.get_optional::<i64>("ratio"), None);
        assert_eq!(meta.get_optional::<f64>("ratio"), Some(0.5));
    }

    #[test]
    fn test_untagged_values_from_json() {
        let meta: Metadata =
            serde_json::from_str(r#"{"a": "text", "b": 2, "c": 2.5, "d": false}"#).unwrap();
        assert_eq!(meta.get("a"), Some(&MetaValue::Str("text".to_string())));
        assert_eq!(meta.get("b"), Some(&MetaValue::Int(2)));
        assert_eq!(meta.get("c"), Some(&MetaValue::Float(2.5)));
        assert_eq!(meta.get("d"), Some(&MetaValue::Bool(false)));
    }

    #[test]
    fn test_untagged_values_from_ron() {
        let meta: Metadata = ron::from_str(r#"{"animatable": "fan", "speed": 3}"#).unwrap();
        assert_eq!(meta.len(), 2);
        assert_eq!(meta.get_optional::<String>("animatable"), Some("fan".to_string()));
        assert_eq!(meta.get_optional::<i64>("speed"), Some(3));
    }
}
