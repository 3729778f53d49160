//! Schema Linting
//!
//! A schema that constructs is well-formed, but it can still be useless or
//! misleading to the person filling in the form. The linter flags those.
//!
//! ## Lints
//! 1. **EMPTY_MESSAGE** (error): a rule would fail with no visible text
//! 2. **LENGTH_BOUNDS_INVERTED** (error): min length above max length, the field can never be valid
//! 3. **NOOP_RULE** (warning): `min_length` of 0 never fails
//! 4. **DUPLICATE_RULE** (warning): the same kind twice on one field
//! 5. **REQUIRED_SHADOWED** (warning): an earlier rule already fails on empty input,
//!    so the required message is never shown
//! 6. **UNANCHORED_PATTERN** (warning): the expression can match a substring

use std::collections::HashSet;

use crate::rule::{Rule, RuleKind};
use crate::schema::{FieldSpec, Schema};

/// Result of linting a schema
#[derive(Debug, Default)]
pub struct LintResult {
    pub schema_id: String,
    pub errors: Vec<LintError>,
    pub warnings: Vec<LintWarning>,
}

impl LintResult {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[derive(Debug)]
pub struct LintError {
    pub code: &'static str,
    pub message: String,
    pub path: String,
}

#[derive(Debug)]
pub struct LintWarning {
    pub code: &'static str,
    pub message: String,
    pub path: String,
}

/// The schema linter
#[derive(Debug, Default)]
pub struct SchemaLinter;

impl SchemaLinter {
    pub fn new() -> Self {
        Self
    }

    /// Lint a schema
    pub fn lint(&self, schema_id: &str, schema: &Schema) -> LintResult {
        let mut result = LintResult {
            schema_id: schema_id.to_string(),
            ..Default::default()
        };

        for spec in schema.fields() {
            self.lint_field(spec, &mut result);
        }
        result
    }

    fn lint_field(&self, spec: &FieldSpec, result: &mut LintResult) {
        let mut seen = HashSet::new();
        let mut rejects_empty_before: Option<RuleKind> = None;

        for (i, rule) in spec.rules.iter().enumerate() {
            let path = format!("{}.rules[{}]", spec.name, i);

            if rule.message().trim().is_empty() {
                result.errors.push(LintError {
                    code: "EMPTY_MESSAGE",
                    message: format!("'{}' rule has an empty message", rule.kind()),
                    path: path.clone(),
                });
            }

            if !seen.insert(rule.kind()) {
                result.warnings.push(LintWarning {
                    code: "DUPLICATE_RULE",
                    message: format!("Field '{}' has more than one '{}' rule", spec.name, rule.kind()),
                    path: path.clone(),
                });
            }

            match rule {
                Rule::MinLength { n: 0, .. } => {
                    result.warnings.push(LintWarning {
                        code: "NOOP_RULE",
                        message: "min_length of 0 never fails. Remove it.".to_string(),
                        path: path.clone(),
                    });
                }
                Rule::Required { .. } => {
                    if let Some(earlier) = rejects_empty_before {
                        result.warnings.push(LintWarning {
                            code: "REQUIRED_SHADOWED",
                            message: format!(
                                "Earlier '{}' rule already fails on empty input; move 'required' first",
                                earlier
                            ),
                            path: path.clone(),
                        });
                    }
                }
                Rule::Pattern { expression, .. } => {
                    let source = expression.as_str();
                    if !source.starts_with('^') || !source.ends_with('$') {
                        result.warnings.push(LintWarning {
                            code: "UNANCHORED_PATTERN",
                            message: format!("Pattern '{}' is not anchored with ^...$ and may match a substring", source),
                            path: path.clone(),
                        });
                    }
                }
                _ => {}
            }

            if rejects_empty_before.is_none() && rule.rejects_empty() {
                rejects_empty_before = Some(rule.kind());
            }
        }

        self.check_length_bounds(spec, result);
    }

    fn check_length_bounds(&self, spec: &FieldSpec, result: &mut LintResult) {
        let min = spec
            .rules
            .iter()
            .filter_map(|r| match r {
                Rule::MinLength { n, .. } => Some(*n),
                _ => None,
            })
            .max();
        let max = spec
            .rules
            .iter()
            .filter_map(|r| match r {
                Rule::MaxLength { n, .. } => Some(*n),
                _ => None,
            })
            .min();

        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                result.errors.push(LintError {
                    code: "LENGTH_BOUNDS_INVERTED",
                    message: format!("min_length {} exceeds max_length {}; no value can pass", min, max),
                    path: spec.name.clone(),
                });
            }
        }
    }
}
