//! Plain-text table export.

use crate::io::traits::{ExportSink, ExportableConversation};
use crate::{Error, Result};
use std::io::Write;

/// Longest text shown per message column.
const MAX_TEXT_WIDTH: usize = 48;

/// Table export sink.
///
/// Rows are buffered so columns can be aligned at [`ExportSink::finalize`].
pub struct TableExportSink<W: Write> {
    writer: W,
    rows: Vec<[String; 5]>,
}

impl<W: Write> TableExportSink<W> {
    /// Creates a new table export sink.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            rows: Vec::new(),
        }
    }
}

impl<W: Write + Send> ExportSink for TableExportSink<W> {
    fn write(&mut self, record: &ExportableConversation) -> Result<()> {
        let when = record
            .created_at
            .get(..19)
            .unwrap_or(&record.created_at)
            .replace('T', " ");
        self.rows.push([
            record.id.to_string(),
            when,
            format!("{:+}", record.sentiment_score),
            truncate(&record.user_input),
            truncate(&record.bot_response),
        ]);
        Ok(())
    }

    fn finalize(mut self: Box<Self>) -> Result<()> {
        if self.rows.is_empty() {
            writeln!(self.writer, "No conversations recorded yet.")
                .map_err(|e| Error::op("write_table", e))?;
            return self.writer.flush().map_err(|e| Error::op("flush_table", e));
        }

        let header = ["ID", "TIME", "MOOD", "YOU", "BOT"].map(str::to_string);
        let mut widths = header.each_ref().map(|h| h.chars().count());
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let lines = std::iter::once(&header).chain(self.rows.iter());
        for row in lines {
            let line = row
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ");
            writeln!(self.writer, "{}", line.trim_end()).map_err(|e| Error::op("write_table", e))?;
        }
        self.writer.flush().map_err(|e| Error::op("flush_table", e))
    }
}

/// Collapses whitespace and shortens text to the column limit.
fn truncate(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= MAX_TEXT_WIDTH {
        return flat;
    }
    let mut short: String = flat.chars().take(MAX_TEXT_WIDTH - 1).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, user_input: &str) -> ExportableConversation {
        ExportableConversation {
            id,
            created_at: "2024-03-05T14:07:09+00:00".to_string(),
            sentiment_score: -2,
            user_input: user_input.to_string(),
            bot_response: "It sounds like you're feeling sad.".to_string(),
        }
    }

    #[test]
    fn test_table_aligns_columns() {
        let mut output = Vec::new();
        {
            let mut sink = TableExportSink::new(&mut output);
            sink.write(&record(9, "sad")).unwrap();
            sink.write(&record(10, "so very sad")).unwrap();
            Box::new(sink).finalize().unwrap();
        }

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID  TIME"));
        assert!(lines[1].starts_with("9   2024-03-05 14:07:09  -2"));
        let bot_col = lines[0].find("BOT").unwrap();
        assert_eq!(lines[1].find("It sounds"), Some(bot_col));
        assert_eq!(lines[2].find("It sounds"), Some(bot_col));
    }

    #[test]
    fn test_table_empty_message() {
        let mut output = Vec::new();
        Box::new(TableExportSink::new(&mut output)).finalize().unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "No conversations recorded yet.\n"
        );
    }

    #[test]
    fn test_truncate_long_text() {
        let long = "word ".repeat(30);
        let short = truncate(&long);
        assert_eq!(short.chars().count(), MAX_TEXT_WIDTH);
        assert!(short.ends_with('…'));
        assert_eq!(truncate("a\n  b"), "a b");
    }
}
