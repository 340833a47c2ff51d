//! Newline-delimited JSON export.

use crate::io::traits::{ExportSink, ExportableConversation};
use crate::{Error, Result};
use std::io::Write;

/// JSON export sink, one object per line.
pub struct JsonExportSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonExportSink<W> {
    /// Creates a new JSON export sink.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send> ExportSink for JsonExportSink<W> {
    fn write(&mut self, record: &ExportableConversation) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record).map_err(|e| Error::op("write_json", e))?;
        writeln!(self.writer).map_err(|e| Error::op("write_json", e))
    }

    fn finalize(mut self: Box<Self>) -> Result<()> {
        self.writer.flush().map_err(|e| Error::op("flush_json", e))
    }
}
