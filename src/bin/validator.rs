//! Form Validator CLI
//!
//! Validates field snapshots against a form schema, lints schemas and manages
//! configuration.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use familiar_forms::commands::{self, CommandOutput, SchemaFormat};
use familiar_forms::config::FormConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "form-validator")]
#[command(about = "Validate form snapshots against a schema")]
struct Cli {
    /// Config file
    #[arg(short, long)]
    config: Option<String>,

    /// Schema file (.toml or .json), overrides the configured one
    #[arg(short, long)]
    schema: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a snapshot and report every field
    Check {
        /// Snapshot file (JSON object of field -> value)
        snapshot: PathBuf,
    },

    /// Submit a snapshot: print the submitted data if valid
    Submit {
        /// Snapshot file (JSON object of field -> value)
        snapshot: PathBuf,
    },

    /// Print the schema
    Schema {
        #[arg(short, long, value_enum, default_value = "toml")]
        format: FormatArg,
    },

    /// Lint the schema
    Lint,

    /// View and manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Initialize a new config file
    Init {
        /// Output path
        #[arg(short, long, default_value = "forms.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Toml,
    Json,
}

impl From<FormatArg> for SchemaFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Toml => SchemaFormat::Toml,
            FormatArg::Json => SchemaFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match FormConfig::load_from(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    // Logs go to stderr so stdout stays machine-readable for `submit`
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli, config) {
        Ok(output) => {
            print!("{}", output.stdout);
            eprint!("{}", output.stderr);
            let _ = std::io::stdout().flush();
            std::process::exit(output.exit_code());
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli, mut config: FormConfig) -> anyhow::Result<CommandOutput> {
    if let Some(path) = cli.schema {
        config.schema.path = Some(path);
    }

    let load_schema = || config.load_schema().context("loading schema");

    let output = match cli.command {
        Commands::Check { snapshot } => {
            let schema = load_schema()?;
            let snapshot = commands::load_snapshot(&snapshot, &schema)
                .with_context(|| format!("loading snapshot {}", snapshot.display()))?;
            commands::check(&schema, &snapshot)
        }

        Commands::Submit { snapshot } => {
            let schema = load_schema()?;
            let snapshot = commands::load_snapshot(&snapshot, &schema)
                .with_context(|| format!("loading snapshot {}", snapshot.display()))?;
            commands::submit(&schema, &snapshot, config.output.format)?
        }

        Commands::Schema { format } => commands::show_schema(&load_schema()?, format.into())?,

        Commands::Lint => {
            let schema_id = config
                .schema
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "builtin:signup".to_string());
            commands::lint(&schema_id, &load_schema()?)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => commands::show_config(&config)?,
            ConfigAction::Init { output, force } => commands::init_config(&output, force)?,
        },
    };

    Ok(output)
}
