//! Output formatting for chunk sets

use strata_core::ChunkSet;

use crate::error::CliResult;

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Trait for writing chunk sets in different formats.
pub trait OutputFormatter {
    /// Write the chunk set produced from one input document.
    fn write_document(&mut self, source: &str, set: &ChunkSet) -> CliResult<()>;

    /// Finish writing and flush any buffered output.
    fn finish(&mut self) -> CliResult<()>;
}
