//! Output sinks for finished events.

use std::io::Write;

use crate::error::Result;
use crate::pipeline::EventAnalysis;

/// Destination for complete per-event results.
///
/// The scanner calls [`RowSink::write_event`] only with fully analyzed
/// events, one at a time, so a sink never sees partial output.
pub trait RowSink: Send {
    /// Append every row of one event.
    fn write_event(&mut self, analysis: &EventAnalysis) -> Result<()>;

    /// Flush buffered output.
    fn flush(&mut self) -> Result<()>;
}

/// Writes one JSON object per row, one row per line.
pub struct JsonLinesSink<W: Write + Send> {
    writer: W,
    rows_written: usize,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            rows_written: 0,
        }
    }

    /// Rows written so far.
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> RowSink for JsonLinesSink<W> {
    fn write_event(&mut self, analysis: &EventAnalysis) -> Result<()> {
        // Serialize the whole event before touching the writer.
        let mut buffer = Vec::new();
        for row in &analysis.rows {
            serde_json::to_writer(&mut buffer, row)?;
            buffer.push(b'\n');
        }
        self.writer.write_all(&buffer)?;
        self.rows_written += analysis.rows.len();
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
