//! Command implementations behind the `form-validator` CLI
//!
//! Each command renders its report into a [`CommandOutput`] instead of
//! printing, so the binary only writes the streams and maps `success` to the
//! exit status.

use std::path::Path;

use crate::config::{FormConfig, OutputFormat};
use crate::engine::{submit_gate, validate, Submission};
use crate::error::{Result, SchemaError};
use crate::lint::SchemaLinter;
use crate::schema::Schema;
use crate::snapshot::Snapshot;

/// Rendered result of a command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the command succeeded; exit status 1 otherwise
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    fn ok(stdout: String) -> Self {
        Self {
            success: true,
            stdout,
            stderr: String::new(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        if self.success {
            0
        } else {
            1
        }
    }
}

/// Format for printing a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Toml,
    Json,
}

/// Read a snapshot file and check it covers every declared field
pub fn load_snapshot(path: &Path, schema: &Schema) -> Result<Snapshot> {
    let content = std::fs::read_to_string(path)?;
    let snapshot = Snapshot::from_json_str(&content)?;
    snapshot.ensure_complete(schema)?;
    Ok(snapshot)
}

/// Validate a snapshot and report every field
pub fn check(schema: &Schema, snapshot: &Snapshot) -> CommandOutput {
    let result = validate(schema, snapshot);

    let mut stdout = format!("🔍 Validating {} field(s)...\n", result.len());
    for (field, message) in result.iter() {
        match message {
            None => stdout.push_str(&format!("  ✅ {}\n", field)),
            Some(message) => stdout.push_str(&format!("  ❌ {} - {}\n", field, message)),
        }
    }

    stdout.push('\n');
    if result.is_satisfied() {
        stdout.push_str("✅ All fields valid\n");
    } else {
        stdout.push_str(&format!("❌ {} field(s) invalid\n", result.error_count()));
    }

    CommandOutput {
        success: result.is_satisfied(),
        stdout,
        stderr: String::new(),
    }
}

/// Submit a snapshot: the submitted data on stdout, or the errors on stderr
pub fn submit(schema: &Schema, snapshot: &Snapshot, format: OutputFormat) -> Result<CommandOutput> {
    match submit_gate(schema, snapshot, |data| format.to_json(data)) {
        Submission::Submitted { output, .. } => Ok(CommandOutput::ok(format!("{}\n", output?))),
        Submission::Rejected(result) => Ok(CommandOutput {
            success: false,
            stdout: String::new(),
            stderr: format!("❌ Submission rejected\n{}\n", format.to_json(&result)?),
        }),
    }
}

/// Render the schema
pub fn show_schema(schema: &Schema, format: SchemaFormat) -> Result<CommandOutput> {
    let rendered = match format {
        SchemaFormat::Toml => schema.to_toml()?,
        SchemaFormat::Json => schema.to_json_pretty()?,
    };
    Ok(CommandOutput::ok(format!("{}\n", rendered)))
}

/// Lint the schema; fails on lint errors, not on warnings
pub fn lint(schema_id: &str, schema: &Schema) -> CommandOutput {
    let result = SchemaLinter::new().lint(schema_id, schema);

    if result.is_clean() && !result.has_warnings() {
        return CommandOutput::ok(format!("✅ {} - clean\n", result.schema_id));
    }

    let mut stdout = format!("🔍 {}\n", result.schema_id);
    for error in &result.errors {
        stdout.push_str(&format!("  ❌ [{}] {} at {}\n", error.code, error.message, error.path));
    }
    for warning in &result.warnings {
        stdout.push_str(&format!("  ⚠️  [{}] {} at {}\n", warning.code, warning.message, warning.path));
    }

    let stderr = if result.is_clean() {
        String::new()
    } else {
        format!("❌ {} lint error(s)\n", result.errors.len())
    };

    CommandOutput {
        success: result.is_clean(),
        stdout,
        stderr,
    }
}

/// Write a default config file, refusing to overwrite unless `force`
pub fn init_config(output: &Path, force: bool) -> Result<CommandOutput> {
    if output.exists() && !force {
        return Err(SchemaError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} already exists (use --force to overwrite)", output.display()),
        )));
    }

    FormConfig::default().save(output)?;
    Ok(CommandOutput::ok(format!("✅ Created config file: {}\n", output.display())))
}

/// Render the effective configuration as TOML
pub fn show_config(config: &FormConfig) -> Result<CommandOutput> {
    Ok(CommandOutput::ok(toml::to_string_pretty(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signup::signup_schema;

    #[test]
    fn test_check_reports_each_field() {
        let schema = signup_schema().unwrap();
        let output = check(&schema, &Snapshot::blank_for(&schema));
        assert!(!output.success);
        assert_eq!(output.exit_code(), 1);
        assert_eq!(output.stdout.matches("❌ ").count(), 4);
        assert!(output.stdout.contains("3 field(s) invalid"));
    }

    #[test]
    fn test_lint_fails_only_on_errors() {
        let schema = Schema::new(vec![crate::schema::FieldSpec::new(
            "code",
            vec![crate::rule::Rule::pattern(r"\d+", "digits").unwrap()],
        )])
        .unwrap();
        let output = lint("test", &schema);
        assert!(output.success);
        assert!(output.stdout.contains("UNANCHORED_PATTERN"));

        let schema = Schema::new(vec![crate::schema::FieldSpec::new(
            "code",
            vec![crate::rule::Rule::required("")],
        )])
        .unwrap();
        let output = lint("test", &schema);
        assert!(!output.success);
        assert!(output.stderr.contains("1 lint error(s)"));
    }

    #[test]
    fn test_init_config_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forms.toml");

        assert!(init_config(&path, false).unwrap().success);
        assert!(init_config(&path, false).is_err());
        assert!(init_config(&path, true).unwrap().success);
    }
}
