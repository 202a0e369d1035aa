//! Validate command implementation

use std::fs;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::Args;
use serde::Serialize;
use strata_core::{Severity, ValidationResult};

use crate::error::{CliError, CliResult};

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Input text file(s)
    #[arg(short, long, value_name = "FILE", required = true, num_args = 1..)]
    pub input: Vec<PathBuf>,

    /// Token budget per chunk
    #[arg(long, value_name = "N")]
    pub max_tokens: Option<usize>,

    /// Tokens repeated between consecutive split chunks
    #[arg(long, value_name = "N")]
    pub overlap_tokens: Option<usize>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Serialize)]
struct ReportOutput<'a> {
    source: String,
    chunk_count: usize,
    #[serde(flatten)]
    report: &'a ValidationResult,
}

impl ValidateArgs {
    /// Execute the validate command.
    pub fn execute(&self) -> CliResult<()> {
        super::init_logging(self.quiet, self.verbose);

        let engine = super::build_engine(
            self.config.as_deref(),
            self.max_tokens,
            self.overlap_tokens,
        )?;

        let mut reports = Vec::new();
        let mut failures = 0usize;

        for path in &self.input {
            if !path.exists() {
                return Err(CliError::FileNotFound(path.display().to_string()).into());
            }
            let text = fs::read_to_string(path)?;
            let set = engine
                .chunk_text(&text)
                .map_err(|e| CliError::ChunkingError(e.to_string()))?;
            let report = engine.validate(&set);

            if !report.is_valid {
                failures += 1;
            }
            if self.json {
                reports.push((path.display().to_string(), set.len(), report));
            } else {
                print_report(&path.display().to_string(), set.len(), &report);
            }
        }

        if self.json {
            let outputs: Vec<ReportOutput<'_>> = reports
                .iter()
                .map(|(source, chunk_count, report)| ReportOutput {
                    source: source.clone(),
                    chunk_count: *chunk_count,
                    report,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&outputs)?);
        }

        if failures > 0 {
            return Err(anyhow!("{failures} document(s) failed validation"));
        }
        Ok(())
    }
}

fn print_report(source: &str, chunk_count: usize, report: &ValidationResult) {
    if report.is_valid {
        println!("{source}: ok ({chunk_count} chunks)");
        return;
    }
    println!("{source}: {} issue(s)", report.issues.len());
    for issue in &report.issues {
        let label = match issue.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        match &issue.chunk_id {
            Some(id) => println!("  {label}: {} (chunk {id})", issue.message),
            None => println!("  {label}: {}", issue.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        args: ValidateArgs,
    }

    #[test]
    fn input_is_required() {
        assert!(Harness::try_parse_from(["validate"]).is_err());
    }

    #[test]
    fn json_flag_parses() {
        let harness =
            Harness::try_parse_from(["validate", "-i", "doc.txt", "--json"]).unwrap();
        assert!(harness.args.json);
    }

    #[test]
    fn valid_document_passes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Title\n=====\n\nA short body paragraph.").unwrap();

        let harness = Harness::try_parse_from([
            "validate",
            "-i",
            file.path().to_str().unwrap(),
            "-q",
        ])
        .unwrap();
        assert!(harness.args.execute().is_ok());
    }

    #[test]
    fn missing_input_file_fails() {
        let harness =
            Harness::try_parse_from(["validate", "-i", "/nonexistent/input.txt", "-q"]).unwrap();
        assert!(harness.args.execute().is_err());
    }
}
