//! Strata CLI library
//!
//! Command-line interface over the strata-core chunking engine: chunk
//! plain-text documents, inspect the resulting hierarchy, and run the
//! validator from scripts.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use error::{CliError, CliResult};
