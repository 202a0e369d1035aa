//! Chunk command implementation

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use log::info;

use crate::error::{CliError, CliResult};
use crate::output::{JsonFormatter, OutputFormatter, TextFormatter};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented hierarchy overview
    Text,
    /// Full chunk records as one JSON document
    Json,
}

/// Arguments for the chunk command
#[derive(Debug, Args)]
pub struct ChunkArgs {
    /// Input text file(s)
    #[arg(short, long, value_name = "FILE", required = true, num_args = 1..)]
    pub input: Vec<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Token budget per chunk
    #[arg(long, value_name = "N")]
    pub max_tokens: Option<usize>,

    /// Tokens repeated between consecutive split chunks
    #[arg(long, value_name = "N")]
    pub overlap_tokens: Option<usize>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ChunkArgs {
    /// Execute the chunk command.
    pub fn execute(&self) -> CliResult<()> {
        super::init_logging(self.quiet, self.verbose);

        let engine = super::build_engine(
            self.config.as_deref(),
            self.max_tokens,
            self.overlap_tokens,
        )?;

        let writer: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(fs::File::create(path)?),
            None => Box::new(io::stdout()),
        };
        let mut formatter: Box<dyn OutputFormatter> = match self.format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        };

        for path in &self.input {
            if !path.exists() {
                return Err(CliError::FileNotFound(path.display().to_string()).into());
            }
            let text = fs::read_to_string(path)?;
            let mut set = engine
                .chunk_text(&text)
                .map_err(|e| CliError::ChunkingError(e.to_string()))?;
            set.populate_children();
            info!("{}: {} chunks", path.display(), set.len());
            formatter.write_document(&path.display().to_string(), &set)?;
        }

        formatter.finish()
    }
}
