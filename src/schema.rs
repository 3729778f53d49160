//! Form schema types
//!
//! A [`Schema`] is an ordered list of [`FieldSpec`]s. It is built once, checked
//! for construction defects, and never mutated afterwards.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, SchemaError};
use crate::rule::Rule;

/// A field and its ordered rules
///
/// Rules are evaluated in order and evaluation stops at the first failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field identifier (e.g., "email", "passwordCheck")
    pub name: String,
    /// Rules in evaluation order
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }
}

/// Serialized form of a schema, before construction checks
#[derive(Debug, Deserialize)]
struct SchemaDefinition {
    #[serde(default)]
    fields: Vec<FieldSpec>,
}

/// An ordered, immutable collection of field specifications
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let definition = SchemaDefinition::deserialize(deserializer)?;
        Schema::new(definition.fields).map_err(serde::de::Error::custom)
    }
}

impl Schema {
    /// Create a schema, rejecting duplicate fields and dangling references
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self> {
        let mut names = HashSet::new();
        for spec in &fields {
            if !names.insert(spec.name.as_str()) {
                return Err(SchemaError::DuplicateField(spec.name.clone()));
            }
        }

        for spec in &fields {
            for other in spec.rules.iter().filter_map(Rule::referenced_field) {
                if other == spec.name {
                    return Err(SchemaError::SelfReference(spec.name.clone()));
                }
                if !names.contains(other) {
                    return Err(SchemaError::UnknownFieldReference {
                        field: spec.name.clone(),
                        other: other.to_string(),
                    });
                }
            }
        }

        Ok(Self { fields })
    }

    /// Parse a schema from JSON
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a schema from TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a schema file, picking the format from its extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            other => Err(SchemaError::InvalidFormat(format!(
                "unsupported schema file extension {:?} for {}",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get all field specs in declaration order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Get a field spec by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_field_rejected() {
        let err = Schema::new(vec![
            FieldSpec::new("email", vec![]),
            FieldSpec::new("email", vec![]),
        ])
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateField(name) if name == "email"));
    }

    #[test]
    fn test_unknown_reference_rejected() {
        let err = Schema::new(vec![FieldSpec::new(
            "passwordCheck",
            vec![Rule::equals_field("password", "mismatch")],
        )])
        .unwrap_err();
        match err {
            SchemaError::UnknownFieldReference { field, other } => {
                assert_eq!(field, "passwordCheck");
                assert_eq!(other, "password");
            }
            other => panic!("Expected UnknownFieldReference, got {:?}", other),
        }
    }

    #[test]
    fn test_self_reference_rejected() {
        let err = Schema::new(vec![FieldSpec::new(
            "password",
            vec![Rule::equals_field("password", "mismatch")],
        )])
        .unwrap_err();
        assert!(matches!(err, SchemaError::SelfReference(_)));
    }

    #[test]
    fn test_reference_may_point_forward() {
        let schema = Schema::new(vec![
            FieldSpec::new("passwordCheck", vec![Rule::equals_field("password", "mismatch")]),
            FieldSpec::new("password", vec![]),
        ])
        .unwrap();
        assert_eq!(schema.field_names().collect::<Vec<_>>(), vec!["passwordCheck", "password"]);
    }

    #[test]
    fn test_toml_round_trip() {
        let schema = Schema::new(vec![
            FieldSpec::new(
                "email",
                vec![
                    Rule::required("required"),
                    Rule::pattern(r"^\S+@\S+$", "format").unwrap(),
                ],
            ),
            FieldSpec::new("nickname", vec![]),
        ])
        .unwrap();

        let toml_str = schema.to_toml().unwrap();
        assert!(toml_str.contains("[[fields]]"));
        assert_eq!(Schema::from_toml_str(&toml_str).unwrap(), schema);
    }

    #[test]
    fn test_deserialization_runs_construction_checks() {
        let err = Schema::from_json_str(
            r#"{"fields": [{"name": "a", "rules": [{"kind": "equals_field", "other_field": "b", "message": "x"}]}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("undeclared field b"));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.yaml");
        std::fs::write(&path, "fields: []").unwrap();
        assert!(matches!(Schema::load(&path), Err(SchemaError::InvalidFormat(_))));
    }
}
