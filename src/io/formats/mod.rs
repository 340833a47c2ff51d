//! Format adapters for history export.

pub mod csv;
pub mod json;
pub mod table;
pub mod yaml;

use super::traits::ExportSink;
use crate::{Error, Result};
use std::io::Write;
use std::str::FromStr;

/// Supported export formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Format {
    /// Aligned plain-text table.
    #[default]
    Table,
    /// Newline-delimited JSON.
    Json,
    /// YAML document stream.
    Yaml,
    /// CSV with a header row.
    Csv,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(Self::Table),
            "json" | "ndjson" | "jsonl" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "csv" => Ok(Self::Csv),
            _ => Err(Error::InvalidInput(format!("Unknown format: {s}"))),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Creates an export sink for the given format and writer.
///
/// # Errors
///
/// Returns an error if sink creation fails.
pub fn create_export_sink<W: Write + Send + 'static>(
    writer: W,
    format: Format,
) -> Result<Box<dyn ExportSink>> {
    match format {
        Format::Table => Ok(Box::new(table::TableExportSink::new(writer))),
        Format::Json => Ok(Box::new(json::JsonExportSink::new(writer))),
        Format::Yaml => Ok(Box::new(yaml::YamlExportSink::new(writer))),
        Format::Csv => Ok(Box::new(csv::CsvExportSink::new(writer)?)),
    }
}
