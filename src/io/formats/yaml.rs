//! YAML document-stream export.

use crate::io::traits::{ExportSink, ExportableConversation};
use crate::{Error, Result};
use std::io::Write;

/// YAML export sink, one document per record.
pub struct YamlExportSink<W: Write> {
    writer: W,
    /// Number of records written.
    count: usize,
}

impl<W: Write> YamlExportSink<W> {
    /// Creates a new YAML export sink.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer, count: 0 }
    }
}

impl<W: Write + Send> ExportSink for YamlExportSink<W> {
    fn write(&mut self, record: &ExportableConversation) -> Result<()> {
        if self.count > 0 {
            writeln!(self.writer, "---").map_err(|e| Error::op("write_yaml", e))?;
        }
        serde_yaml_ng::to_writer(&mut self.writer, record).map_err(|e| Error::op("write_yaml", e))?;
        self.count += 1;
        Ok(())
    }

    fn finalize(mut self: Box<Self>) -> Result<()> {
        self.writer.flush().map_err(|e| Error::op("flush_yaml", e))
    }
}
