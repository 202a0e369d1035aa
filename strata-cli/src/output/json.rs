//! JSON output formatter

use std::io::Write;

use serde::Serialize;
use strata_core::{Chunk, ChunkSet};

use crate::error::CliResult;

use super::OutputFormatter;

#[derive(Serialize)]
struct DocumentOutput {
    source: String,
    chunk_count: usize,
    chunks: Vec<Chunk>,
}

/// Buffering formatter that emits one JSON document at `finish`.
pub struct JsonFormatter<W: Write> {
    writer: W,
    documents: Vec<DocumentOutput>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a formatter over any writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            documents: Vec::new(),
        }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn write_document(&mut self, source: &str, set: &ChunkSet) -> CliResult<()> {
        self.documents.push(DocumentOutput {
            source: source.to_string(),
            chunk_count: set.len(),
            chunks: set.chunks.clone(),
        });
        Ok(())
    }

    fn finish(&mut self) -> CliResult<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.documents)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
