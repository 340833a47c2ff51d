//! CSV export.

use crate::io::traits::{ExportSink, ExportableConversation};
use crate::{Error, Result};
use std::io::Write;

/// Column order of the CSV header.
const HEADERS: [&str; 5] = [
    "id",
    "created_at",
    "sentiment_score",
    "user_input",
    "bot_response",
];

/// CSV export sink.
///
/// The header row is written even when there are no records.
pub struct CsvExportSink<W: Write> {
    writer: csv::Writer<W>,
    /// Whether headers have been written.
    headers_written: bool,
}

impl<W: Write> CsvExportSink<W> {
    /// Creates a new CSV export sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer cannot be created.
    pub fn new(writer: W) -> Result<Self> {
        let csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        Ok(Self {
            writer: csv_writer,
            headers_written: false,
        })
    }

    fn ensure_headers(&mut self) -> Result<()> {
        if !self.headers_written {
            self.writer
                .write_record(HEADERS)
                .map_err(|e| Error::op("write_csv_headers", e))?;
            self.headers_written = true;
        }
        Ok(())
    }
}

impl<W: Write + Send> ExportSink for CsvExportSink<W> {
    fn write(&mut self, record: &ExportableConversation) -> Result<()> {
        self.ensure_headers()?;
        self.writer
            .write_record([
                record.id.to_string().as_str(),
                record.created_at.as_str(),
                record.sentiment_score.to_string().as_str(),
                record.user_input.as_str(),
                record.bot_response.as_str(),
            ])
            .map_err(|e| Error::op("write_csv", e))
    }

    fn finalize(mut self: Box<Self>) -> Result<()> {
        self.ensure_headers()?;
        self.writer.flush().map_err(|e| Error::op("flush_csv", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_csv_quotes_commas() {
        let mut output = Vec::new();
        {
            let mut sink = CsvExportSink::new(&mut output).unwrap();
            sink.write(&ExportableConversation {
                id: 7,
                created_at: "2024-01-01T00:00:00+00:00".to_string(),
                sentiment_score: 1,
                user_input: "well, I feel happy".to_string(),
                bot_response: "Glad to hear it.".to_string(),
            })
            .unwrap();
            Box::new(sink).finalize().unwrap();
        }

        let text = String::from_utf8(output).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("id,created_at,sentiment_score,user_input,bot_response")
        );
        assert_eq!(
            lines.next(),
            Some("7,2024-01-01T00:00:00+00:00,1,\"well, I feel happy\",Glad to hear it.")
        );
    }

    #[test]
    fn test_export_csv_empty_has_header() {
        let mut output = Vec::new();
        Box::new(CsvExportSink::new(&mut output).unwrap())
            .finalize()
            .unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "id,created_at,sentiment_score,user_input,bot_response\n"
        );
    }
}
