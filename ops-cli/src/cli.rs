use clap::{Parser, Subcommand};
use std::path::PathBuf;

use grievance_schemas::SchemaKind;
use logger_redacted::LogFormat;

/// Grievance Engine operations CLI
#[derive(Parser, Debug)]
#[command(name = "grievance")]
#[command(about = "Validate complaint-tracking payloads and summarize complaint listings")]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log output format (pretty or json); overrides GRIEVANCE_LOG_FORMAT
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    #[command(flatten)]
    pub validation: ValidationArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Overrides applied on top of the configured validation settings
#[derive(clap::Args, Debug, Default)]
pub struct ValidationArgs {
    /// Validation config file (TOML, YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Accept only values already of the declared type
    #[arg(long, global = true)]
    pub strict: bool,

    /// Reject strings longer than this many characters
    #[arg(long, global = true)]
    pub max_str_length: Option<usize>,

    /// Reject inf/nan spelled in string input
    #[arg(long, global = true)]
    pub reject_inf_nan: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate one JSON payload and print the normalized record
    Validate {
        /// Record kind, e.g. user-create, complaint-ai-response, worker
        #[arg(short, long)]
        schema: SchemaKind,

        /// Input file; stdin when omitted
        file: Option<PathBuf>,
    },

    /// Validate a JSON array of complaint responses and print dashboard stats
    Stats {
        /// Input file; stdin when omitted
        file: Option<PathBuf>,
    },

    /// List the record kinds `validate` accepts
    Schemas,
}

impl Command {
    pub fn input_file(&self) -> Option<&PathBuf> {
        match self {
            Self::Validate { file, .. } | Self::Stats { file } => file.as_ref(),
            Self::Schemas => None,
        }
    }
}
