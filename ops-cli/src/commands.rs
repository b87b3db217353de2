use anyhow::Result;
use serde_json::Value;
use std::io::{Read, Write};

use error_common::{GrievanceError, ValidationError};
use grievance_schemas::{validate_listing, ComplaintStats, SchemaKind, ValidationConfig};

use crate::cli::{Command, ValidationArgs};

/// Whether the command's input passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Valid,
    Invalid,
}

/// Resolve validation settings: config file (or environment), then flags.
pub fn resolve_config(args: &ValidationArgs) -> Result<ValidationConfig> {
    let mut config = match &args.config {
        Some(path) => ValidationConfig::from_file(path)?,
        None => ValidationConfig::from_env()?,
    };

    if args.strict {
        config.strict = true;
    }
    if let Some(max) = args.max_str_length {
        config.max_str_length = Some(max);
    }
    if args.reject_inf_nan {
        config.allow_inf_nan = false;
    }

    tracing::debug!(?config, "validation config resolved");
    Ok(config)
}

pub fn execute<R: Read, W: Write>(
    command: &Command,
    config: &ValidationConfig,
    mut input: R,
    out: &mut W,
) -> Result<Outcome> {
    match command {
        Command::Schemas => {
            for kind in SchemaKind::ALL {
                writeln!(out, "{:<24}{}", kind.slug(), kind.schema_name())?;
            }
            Ok(Outcome::Valid)
        }
        Command::Validate { schema, .. } => {
            let Some(payload) = read_payload(&mut input, schema.schema_name(), out)? else {
                return Ok(Outcome::Invalid);
            };
            match schema.normalize(&payload, config) {
                Ok(record) => {
                    tracing::info!(schema = schema.schema_name(), "payload valid");
                    write_json(out, &record)?;
                    Ok(Outcome::Valid)
                }
                Err(GrievanceError::Validation(err)) => report(out, &err),
                Err(other) => Err(other.into()),
            }
        }
        Command::Stats { .. } => {
            let Some(payload) = read_payload(&mut input, "ComplaintAIResponse", out)? else {
                return Ok(Outcome::Invalid);
            };
            match validate_listing(&payload, config) {
                Ok(complaints) => {
                    let stats = ComplaintStats::from_complaints(&complaints);
                    tracing::info!(total = stats.total, critical = stats.critical, "listing summarized");
                    write_json(out, &serde_json::to_value(stats)?)?;
                    Ok(Outcome::Valid)
                }
                Err(err) => report(out, &err),
            }
        }
    }
}

// Malformed JSON is a validation failure of the whole document, reported
// in the same shape as field errors.
fn read_payload<R: Read, W: Write>(input: &mut R, schema: &str, out: &mut W) -> Result<Option<Value>> {
    let mut text = String::new();
    if let Err(e) = input.read_to_string(&mut text) {
        let err = GrievanceError::from(e);
        error_common::log_error("ops-cli", &err);
        return Err(anyhow::Error::new(err).context("failed to read input"));
    }

    match serde_json::from_str(&text) {
        Ok(payload) => Ok(Some(payload)),
        Err(e) => {
            tracing::debug!(error = %e, "input is not valid JSON");
            let err = ValidationError::single(
                schema,
                error_common::FieldError::type_mismatch(error_common::ROOT_FIELD, "JSON document"),
            );
            report(out, &err)?;
            Ok(None)
        }
    }
}

fn report<W: Write>(out: &mut W, err: &ValidationError) -> Result<Outcome> {
    error_common::log_error("ops-cli", &GrievanceError::Validation(err.clone()));
    write_json(out, &serde_json::to_value(err)?)?;
    Ok(Outcome::Invalid)
}

fn write_json<W: Write>(out: &mut W, value: &Value) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
