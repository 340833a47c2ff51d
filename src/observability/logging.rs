//! Log filter and format selection.

use crate::config::LoggingSettings;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive for haven.
pub const LOG_ENV: &str = "HAVEN_LOG";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Parses a format name; anything but `json` is pretty.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug)]
pub struct LoggingConfig {
    /// Filter directive applied to every layer.
    pub filter: EnvFilter,
    /// Output format.
    pub format: LogFormat,
    /// Write to this file instead of stderr.
    pub file: Option<PathBuf>,
    /// A malformed directive replaced by `warn`, reported after init.
    pub rejected_directive: Option<String>,
}

impl LoggingConfig {
    /// Builds the configuration.
    ///
    /// Filter precedence: `HAVEN_LOG`, `RUST_LOG`, the config file level,
    /// `--verbose` (debug), then `warn`.
    #[must_use]
    pub fn from_settings(settings: &LoggingSettings, verbose: bool) -> Self {
        let directive = env_directive()
            .or_else(|| settings.level.clone())
            .unwrap_or_else(|| if verbose { "debug" } else { "warn" }.to_string());

        let (filter, rejected_directive) = parse_filter(&directive);
        Self {
            filter,
            rejected_directive,
            format: settings
                .format
                .as_deref()
                .map(LogFormat::parse)
                .unwrap_or_default(),
            file: settings.file.clone(),
        }
    }

    /// Sends output to `path` unless a file is already configured.
    #[must_use]
    pub fn with_default_file(mut self, path: PathBuf) -> Self {
        if self.file.is_none() {
            self.file = Some(path);
        }
        self
    }
}

fn env_directive() -> Option<String> {
    [LOG_ENV, "RUST_LOG"]
        .into_iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|v| !v.trim().is_empty())
}

/// Parses a directive, falling back to `warn` if it is malformed.
fn parse_filter(directive: &str) -> (EnvFilter, Option<String>) {
    EnvFilter::try_new(directive).map_or_else(
        |_| (EnvFilter::new("warn"), Some(directive.to_string())),
        |filter| (filter, None),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("json", LogFormat::Json; "json")]
    #[test_case(" JSON ", LogFormat::Json; "json mixed case")]
    #[test_case("pretty", LogFormat::Pretty; "pretty")]
    #[test_case("xml", LogFormat::Pretty; "unknown is pretty")]
    fn test_log_format_parse(name: &str, expected: LogFormat) {
        assert_eq!(LogFormat::parse(name), expected);
    }

    #[test]
    fn test_default_file_does_not_override() {
        let settings = LoggingSettings {
            file: Some(PathBuf::from("/var/log/haven.log")),
            ..LoggingSettings::default()
        };
        let config = LoggingConfig::from_settings(&settings, false)
            .with_default_file(PathBuf::from("/tmp/other.log"));
        assert_eq!(config.file, Some(PathBuf::from("/var/log/haven.log")));
    }

    #[test]
    fn test_default_file_fills_gap() {
        let config = LoggingConfig::from_settings(&LoggingSettings::default(), true)
            .with_default_file(PathBuf::from("/tmp/haven.log"));
        assert_eq!(config.file, Some(PathBuf::from("/tmp/haven.log")));
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn test_bad_directive_falls_back() {
        let (filter, rejected) = parse_filter("haven=notalevel");
        assert_eq!(filter.to_string(), "warn");
        assert_eq!(rejected.as_deref(), Some("haven=notalevel"));
        assert!(parse_filter("haven=debug").1.is_none());
    }
}
