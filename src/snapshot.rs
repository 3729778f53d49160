//! Field value snapshots
//!
//! The snapshot is owned by the form; the engine only ever borrows it for the
//! duration of a single call.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};
use crate::schema::Schema;

/// Current string content of every field, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(BTreeMap<String, String>);

impl Snapshot {
    /// Create a snapshot with an empty value for every declared field
    pub fn blank_for(schema: &Schema) -> Self {
        schema
            .field_names()
            .map(|name| (name.to_string(), String::new()))
            .collect()
    }

    /// Parse a snapshot from a JSON object of strings
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Set the value of a field, returning the previous value
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(field.into(), value.into())
    }

    /// Get the value of a field the caller guarantees is present
    ///
    /// # Panics
    ///
    /// Panics if `field` has no entry. A missing entry for a declared field is
    /// a caller defect, never a user input error.
    pub fn value_of(&self, field: &str) -> &str {
        match self.get(field) {
            Some(value) => value,
            None => panic!("snapshot has no value for declared field '{}'", field),
        }
    }

    /// Get the declared fields that have no entry
    pub fn missing_fields<'s>(&self, schema: &'s Schema) -> Vec<&'s str> {
        schema
            .field_names()
            .filter(|name| !self.0.contains_key(*name))
            .collect()
    }

    /// Check that every declared field has an entry
    pub fn ensure_complete(&self, schema: &Schema) -> Result<()> {
        let missing = self.missing_fields(schema);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::IncompleteSnapshot {
                missing: missing.into_iter().map(String::from).collect(),
            })
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
