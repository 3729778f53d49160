//! Validation engine
//!
//! [`validate`] is a pure function of a schema and a snapshot. [`submit_gate`]
//! is the only entry point with a side effect: it runs the caller's success
//! callback when every field is valid.

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, trace};

use crate::rule::Outcome;
use crate::schema::Schema;
use crate::snapshot::Snapshot;

/// Per-field outcome of validating a snapshot
///
/// Holds exactly one entry per declared field, in schema order. An absent
/// message means the field is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    entries: Vec<(String, Option<String>)>,
}

impl ValidationResult {
    /// Get the error message for a field, or `None` if it is valid or undeclared
    pub fn error(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .and_then(|(_, message)| message.as_deref())
    }

    /// Whether the result has an entry for `field`
    pub fn contains(&self, field: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == field)
    }

    /// Iterate over every field and its optional message
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(name, message)| (name.as_str(), message.as_deref()))
    }

    /// Iterate over failing fields only
    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(name, message)| message.as_deref().map(|m| (name.as_str(), m)))
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether every field is valid
    pub fn is_satisfied(&self) -> bool {
        self.entries.iter().all(|(_, message)| message.is_none())
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, message) in &self.entries {
            map.serialize_entry(name, message)?;
        }
        map.end()
    }
}

/// Outcome of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission<T> {
    /// Every field was valid; carries the success callback's return value
    Submitted { output: T, result: ValidationResult },
    /// At least one field was invalid; the callback was not called
    Rejected(ValidationResult),
}

impl<T> Submission<T> {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Submission::Submitted { .. })
    }

    /// Get the validation result behind this outcome
    pub fn result(&self) -> &ValidationResult {
        match self {
            Submission::Submitted { result, .. } | Submission::Rejected(result) => result,
        }
    }

    /// Get the validation result of a rejected submission
    pub fn rejection(&self) -> Option<&ValidationResult> {
        match self {
            Submission::Submitted { .. } => None,
            Submission::Rejected(result) => Some(result),
        }
    }

    /// Get the success callback's return value, if it ran
    pub fn output(self) -> Option<T> {
        match self {
            Submission::Submitted { output, .. } => Some(output),
            Submission::Rejected(_) => None,
        }
    }
}

/// Validate a snapshot against a schema
///
/// Each field's rules run in order; the first failing rule's message becomes
/// that field's error. Fields without rules are always valid. Extra snapshot
/// entries are ignored.
///
/// # Panics
///
/// Panics if `snapshot` lacks an entry for a declared field. Callers must
/// guarantee completeness, e.g. with [`Snapshot::ensure_complete`].
pub fn validate(schema: &Schema, snapshot: &Snapshot) -> ValidationResult {
    let entries = schema
        .fields()
        .iter()
        .map(|spec| {
            let value = snapshot.value_of(&spec.name);
            let message = spec.rules.iter().find_map(|rule| match rule.evaluate(value, snapshot) {
                Outcome::Pass => None,
                Outcome::Fail(message) => {
                    trace!(field = %spec.name, rule = %rule.kind(), "rule failed");
                    Some(message.to_string())
                }
            });
            (spec.name.clone(), message)
        })
        .collect();

    let result = ValidationResult { entries };
    debug!(
        fields = result.len(),
        errors = result.error_count(),
        "validated snapshot"
    );
    result
}

/// Whether every entry of `result` is valid
pub fn is_satisfied(result: &ValidationResult) -> bool {
    result.is_satisfied()
}

/// Validate and, if satisfied, hand the full snapshot to `on_success`
///
/// The callback runs at most once, and only when every field is valid.
pub fn submit_gate<T, F>(schema: &Schema, snapshot: &Snapshot, on_success: F) -> Submission<T>
where
    F: FnOnce(&Snapshot) -> T,
{
    let result = validate(schema, snapshot);
    if is_satisfied(&result) {
        debug!(fields = snapshot.len(), "submit accepted");
        Submission::Submitted {
            output: on_success(snapshot),
            result,
        }
    } else {
        debug!(errors = result.error_count(), "submit rejected");
        Submission::Rejected(result)
    }
}
