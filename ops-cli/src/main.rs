use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::process::ExitCode;

use logger_redacted::LoggerConfig;
use ops_cli::{execute, resolve_config, Cli, Outcome};

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut logger = LoggerConfig::from_env()?;
    if let Some(format) = cli.log_format {
        logger = logger.with_format(format);
    }
    if cli.verbose {
        logger = logger.with_level("debug");
    }
    logger_redacted::init(&logger)?;

    let config = resolve_config(&cli.validation)?;
    let mut stdout = io::stdout().lock();

    let outcome = match cli.command.input_file() {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            execute(&cli.command, &config, BufReader::new(file), &mut stdout)?
        }
        None => execute(&cli.command, &config, io::stdin().lock(), &mut stdout)?,
    };

    Ok(match outcome {
        Outcome::Valid => ExitCode::SUCCESS,
        Outcome::Invalid => ExitCode::FAILURE,
    })
}
