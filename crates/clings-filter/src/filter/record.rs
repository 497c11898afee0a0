//! The capability a record needs to be filtered.

use std::collections::{BTreeMap, HashMap};

use super::value::FieldValue;

/// A record whose fields can be looked up by name.
///
/// Implementations should match `name` case-insensitively and return `None`
/// for unknown fields. An unknown field is not an error: conditions on it
/// simply do not match (except `IS NULL`, which does).
pub trait Filterable {
    /// Returns the value of the named field, or `None` if the record has no
    /// such field.
    fn field_value(&self, name: &str) -> Option<FieldValue>;
}

impl<T: Filterable + ?Sized> Filterable for &T {
    fn field_value(&self, name: &str) -> Option<FieldValue> {
        (**self).field_value(name)
    }
}

/// Ad-hoc records keyed by field name.
impl Filterable for HashMap<String, FieldValue> {
    fn field_value(&self, name: &str) -> Option<FieldValue> {
        self.get(name)
            .or_else(|| {
                self.iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, value)| value)
            })
            .cloned()
    }
}

impl Filterable for BTreeMap<String, FieldValue> {
    fn field_value(&self, name: &str) -> Option<FieldValue> {
        self.get(name)
            .or_else(|| {
                self.iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, value)| value)
            })
            .cloned()
    }
}
