//! Rule primitives
//!
//! A [`Rule`] is one atomic check attached to a field. Rules are plain data:
//! they serialize as internally tagged objects, e.g.
//!
//! ```toml
//! [[fields.rules]]
//! kind = "min_length"
//! n = 8
//! message = "Password must be at least 8 characters"
//! ```

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SchemaError};
use crate::snapshot::Snapshot;

/// A compiled regular expression, serialized as its source string
#[derive(Clone)]
pub struct Expression(Regex);

impl Expression {
    /// Compile an expression
    pub fn new(expression: &str) -> Result<Self> {
        Regex::new(expression)
            .map(Self)
            .map_err(|source| SchemaError::InvalidPattern {
                expression: expression.to_string(),
                source,
            })
    }

    /// Get the source string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.0.is_match(value)
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Expression").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Expression {}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Expression::new(&source).map_err(serde::de::Error::custom)
    }
}

/// Kind of rule, used for linting and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Required,
    Pattern,
    MinLength,
    MaxLength,
    EqualsField,
}

impl RuleKind {
    /// Get the serialized tag for this kind
    pub fn tag(&self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::Pattern => "pattern",
            RuleKind::MinLength => "min_length",
            RuleKind::MaxLength => "max_length",
            RuleKind::EqualsField => "equals_field",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Outcome of evaluating a single rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<'r> {
    Pass,
    /// The rule failed; carries the rule's configured message
    Fail(&'r str),
}

impl Outcome<'_> {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }
}

/// A single validation rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    /// Fails on empty or whitespace-only values
    Required { message: String },
    /// Fails on non-empty values that do not match `expression`
    Pattern { expression: Expression, message: String },
    /// Fails when the value has fewer than `n` characters
    MinLength { n: usize, message: String },
    /// Fails when the value has more than `n` characters
    MaxLength { n: usize, message: String },
    /// Fails when the value differs from the current value of `other_field`
    EqualsField { other_field: String, message: String },
}

impl Rule {
    pub fn required(message: impl Into<String>) -> Self {
        Rule::Required { message: message.into() }
    }

    /// Create a pattern rule, compiling `expression`
    pub fn pattern(expression: &str, message: impl Into<String>) -> Result<Self> {
        Ok(Rule::Pattern {
            expression: Expression::new(expression)?,
            message: message.into(),
        })
    }

    pub fn min_length(n: usize, message: impl Into<String>) -> Self {
        Rule::MinLength { n, message: message.into() }
    }

    pub fn max_length(n: usize, message: impl Into<String>) -> Self {
        Rule::MaxLength { n, message: message.into() }
    }

    pub fn equals_field(other_field: impl Into<String>, message: impl Into<String>) -> Self {
        Rule::EqualsField {
            other_field: other_field.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Required { .. } => RuleKind::Required,
            Rule::Pattern { .. } => RuleKind::Pattern,
            Rule::MinLength { .. } => RuleKind::MinLength,
            Rule::MaxLength { .. } => RuleKind::MaxLength,
            Rule::EqualsField { .. } => RuleKind::EqualsField,
        }
    }

    /// Get the message reported when this rule fails
    pub fn message(&self) -> &str {
        match self {
            Rule::Required { message }
            | Rule::Pattern { message, .. }
            | Rule::MinLength { message, .. }
            | Rule::MaxLength { message, .. }
            | Rule::EqualsField { message, .. } => message,
        }
    }

    /// Get the field this rule reads from the snapshot, if any
    pub fn referenced_field(&self) -> Option<&str> {
        match self {
            Rule::EqualsField { other_field, .. } => Some(other_field),
            _ => None,
        }
    }

    /// Whether this rule fails on an empty value
    pub fn rejects_empty(&self) -> bool {
        match self {
            Rule::Required { .. } => true,
            Rule::MinLength { n, .. } => *n > 0,
            Rule::Pattern { .. } | Rule::MaxLength { .. } | Rule::EqualsField { .. } => false,
        }
    }

    /// Evaluate this rule against `value`
    ///
    /// Only [`Rule::EqualsField`] reads `snapshot`. Lengths are counted in
    /// characters on the raw, untrimmed value.
    ///
    /// # Panics
    ///
    /// Panics if an `EqualsField` rule names a field absent from `snapshot`.
    pub fn evaluate<'r>(&'r self, value: &str, snapshot: &Snapshot) -> Outcome<'r> {
        let passed = match self {
            Rule::Required { .. } => !value.trim().is_empty(),
            Rule::Pattern { expression, .. } => value.is_empty() || expression.is_match(value),
            Rule::MinLength { n, .. } => value.chars().count() >= *n,
            Rule::MaxLength { n, .. } => value.chars().count() <= *n,
            Rule::EqualsField { other_field, .. } => value == snapshot.value_of(other_field),
        };

        if passed {
            Outcome::Pass
        } else {
            Outcome::Fail(self.message())
        }
    }
}
