//! Form state
//!
//! [`Form`] is the collaborator that sits between a UI and the engine. It owns
//! the live field values, forwards submit attempts through
//! [`submit_gate`](crate::engine::submit_gate), and keeps the last result
//! around for rendering. It knows nothing about how anything is drawn.
//!
//! ```text
//! Idle --submit--> (validating) --satisfied--> Submitted
//!                               \--unsatisfied--> IdleWithErrors
//! ```
//!
//! By default errors only change on submit. With
//! [`Form::revalidate_on_input`] enabled, every input made after a rejected
//! submit re-validates, so corrected fields clear their errors as the user types.

use chrono::{DateTime, Utc};
use tracing::{info, trace};

use crate::engine::{self, Submission, ValidationResult};
use crate::error::{Result, SchemaError};
use crate::schema::Schema;
use crate::snapshot::Snapshot;

/// Where the form is in its submit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// No submit attempt yet, or editing after a successful submit
    Idle,
    /// The last submit attempt was rejected
    IdleWithErrors,
    /// The last submit attempt was accepted
    Submitted { at: DateTime<Utc> },
}

/// A form bound to a schema
#[derive(Debug, Clone)]
pub struct Form {
    schema: Schema,
    values: Snapshot,
    last_result: Option<ValidationResult>,
    phase: FormPhase,
    revalidate_on_input: bool,
}

impl Form {
    /// Create a form with every field empty
    pub fn new(schema: Schema) -> Self {
        let values = Snapshot::blank_for(&schema);
        Self {
            schema,
            values,
            last_result: None,
            phase: FormPhase::Idle,
            revalidate_on_input: false,
        }
    }

    /// Re-validate on every input once a submit has been rejected
    pub fn revalidate_on_input(mut self, enabled: bool) -> Self {
        self.revalidate_on_input = enabled;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn values(&self) -> &Snapshot {
        &self.values
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Replace the value of a field
    ///
    /// Unless [`Form::revalidate_on_input`] is enabled, input does not
    /// re-validate: errors from the last submit stay visible until the next one.
    pub fn input(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        if !self.schema.contains(field) {
            return Err(SchemaError::UnknownField(field.to_string()));
        }

        self.values.set(field, value);
        trace!(field, "field updated");

        match self.phase {
            FormPhase::Submitted { .. } => self.phase = FormPhase::Idle,
            FormPhase::IdleWithErrors if self.revalidate_on_input => {
                self.last_result = Some(engine::validate(&self.schema, &self.values));
            }
            _ => {}
        }
        Ok(())
    }

    /// Get the current value of a field
    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field)
    }

    /// Get the error shown for a field after the last submit attempt
    pub fn error(&self, field: &str) -> Option<&str> {
        self.last_result.as_ref().and_then(|r| r.error(field))
    }

    /// Get the result of the last submit attempt
    pub fn errors(&self) -> Option<&ValidationResult> {
        self.last_result.as_ref()
    }

    /// Attempt to submit, calling `on_success` with the values if all are valid
    pub fn submit<T, F>(&mut self, on_success: F) -> Submission<T>
    where
        F: FnOnce(&Snapshot) -> T,
    {
        let submission = engine::submit_gate(&self.schema, &self.values, on_success);

        if submission.is_submitted() {
            let at = Utc::now();
            info!(fields = self.values.len(), %at, "form submitted");
            self.phase = FormPhase::Submitted { at };
        } else {
            info!(errors = submission.result().error_count(), "form rejected");
            self.phase = FormPhase::IdleWithErrors;
        }
        self.last_result = Some(submission.result().clone());

        submission
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;
    use crate::schema::FieldSpec;

    fn form() -> Form {
        let schema = Schema::new(vec![
            FieldSpec::new("name", vec![Rule::required("name required")]),
            FieldSpec::new("bio", vec![Rule::max_length(10, "bio too long")]),
        ])
        .unwrap();
        Form::new(schema)
    }

    #[test]
    fn test_new_form_is_blank_and_idle() {
        let form = form();
        assert_eq!(form.phase(), FormPhase::Idle);
        assert_eq!(form.value("name"), Some(""));
        assert_eq!(form.error("name"), None);
        assert!(form.errors().is_none());
    }

    #[test]
    fn test_input_rejects_undeclared_field() {
        let mut form = form();
        assert!(matches!(form.input("age", "3"), Err(SchemaError::UnknownField(_))));
    }

    #[test]
    fn test_rejected_submit_keeps_errors_until_next_submit() {
        let mut form = form();
        let submission = form.submit(|_| ());
        assert!(!submission.is_submitted());
        assert_eq!(form.phase(), FormPhase::IdleWithErrors);
        assert_eq!(form.error("name"), Some("name required"));

        form.input("name", "Ada").unwrap();
        assert_eq!(form.phase(), FormPhase::IdleWithErrors);
        assert_eq!(form.error("name"), Some("name required"));

        assert!(form.submit(|_| ()).is_submitted());
        assert_eq!(form.error("name"), None);
    }

    #[test]
    fn test_submit_hands_over_values() {
        let mut form = form();
        form.input("name", "Ada").unwrap();
        form.input("bio", "math").unwrap();

        let submission = form.submit(|data| data.get("bio").map(String::from));
        assert_eq!(submission.output(), Some(Some("math".to_string())));
        assert!(matches!(form.phase(), FormPhase::Submitted { .. }));

        form.input("bio", "poetry").unwrap();
        assert_eq!(form.phase(), FormPhase::Idle);
    }

    #[test]
    fn test_revalidate_on_input_after_rejected_submit() {
        let mut form = form().revalidate_on_input(true);

        // No submit yet: input leaves errors alone
        form.input("bio", "far too long for a bio").unwrap();
        assert!(form.errors().is_none());

        assert!(!form.submit(|_| ()).is_submitted());
        assert_eq!(form.error("name"), Some("name required"));
        assert_eq!(form.error("bio"), Some("bio too long"));

        form.input("name", "Ada").unwrap();
        assert_eq!(form.error("name"), None);
        assert_eq!(form.error("bio"), Some("bio too long"));
        assert_eq!(form.phase(), FormPhase::IdleWithErrors);

        form.input("name", " ").unwrap();
        assert_eq!(form.error("name"), Some("name required"));
    }

    #[test]
    fn test_successful_submit_keeps_engine_result() {
        let mut form = form();
        form.input("name", "Ada").unwrap();
        let submission = form.submit(|_| ());
        assert_eq!(form.errors(), Some(submission.result()));
        assert_eq!(form.errors().map(|r| r.len()), Some(2));
    }
}
