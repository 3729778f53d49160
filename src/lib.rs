//! Familiar Forms
//!
//! A declarative field-validation engine for input forms. A form declares its
//! fields and their rules as data; the engine turns a snapshot of the current
//! field values into one optional error message per field, and gates submission
//! on every field being valid.
//!
//! ## Features
//!
//! - **Schema as Data**: Rules are plain serde data, loadable from TOML or JSON
//! - **Pure Validation**: `validate` has no side effects and no hidden state
//! - **Short-Circuit Rules**: The first failing rule per field wins
//! - **Cross-Field Checks**: `equals_field` resolves another field by name at validation time
//! - **Schema Linting**: Flags rules that can never fail or never be seen
//!
//! ## Architecture
//!
//! ```text
//! UI events ──> Form (owns Snapshot) ──submit──> engine::submit_gate
//!                    ^                                 │
//!                    └──── ValidationResult <──────────┘──> on_success(&Snapshot)
//! ```

pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod form;
pub mod lint;
pub mod rule;
pub mod schema;
pub mod signup;
pub mod snapshot;

pub use engine::{is_satisfied, submit_gate, validate, Submission, ValidationResult};
pub use error::{Result, SchemaError};
pub use form::{Form, FormPhase};
pub use rule::{Expression, Outcome, Rule, RuleKind};
pub use schema::{FieldSpec, Schema};
pub use snapshot::Snapshot;
