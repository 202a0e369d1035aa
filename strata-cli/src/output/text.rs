//! Text output formatter

use std::io::{self, Write};

use strata_core::ChunkSet;

use crate::error::CliResult;

use super::OutputFormatter;

const PREVIEW_CHARS: usize = 60;

/// Indented, human-readable hierarchy overview.
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl TextFormatter<io::Stdout> {
    /// Formatter writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TextFormatter<W> {
    /// Create a formatter over any writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn preview(content: &str) -> String {
        let flat = content.split_whitespace().collect::<Vec<_>>().join(" ");
        if flat.chars().count() <= PREVIEW_CHARS {
            return flat;
        }
        let cut: String = flat.chars().take(PREVIEW_CHARS - 3).collect();
        format!("{cut}...")
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn write_document(&mut self, source: &str, set: &ChunkSet) -> CliResult<()> {
        writeln!(self.writer, "{source}: {} chunks", set.len())?;
        for chunk in &set.chunks {
            let indent = "  ".repeat(chunk.depth as usize);
            let tokens = chunk
                .metrics
                .as_ref()
                .map(|metrics| metrics.token_count)
                .unwrap_or(0);
            writeln!(
                self.writer,
                "{indent}#{} [{}] {} tokens  {}",
                chunk.sequence,
                chunk.specific_type,
                tokens,
                Self::preview(&chunk.content)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> CliResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}
