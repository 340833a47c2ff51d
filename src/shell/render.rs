//! Transcript rendering.

use crate::{Error, Result};
use std::io::{IsTerminal, Stdout, Write};

const USER_PREFIX: &str = "You: ";
const BOT_PREFIX: &str = "Support Bot: ";
const RESOURCE_MARKER: &str = "» ";

const BLUE_BOLD: &str = "\x1b[1;34m";
const GREEN: &str = "\x1b[32m";
const RED_ITALIC: &str = "\x1b[3;31m";
const RESET: &str = "\x1b[0m";

/// Kind of transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Echoed user input.
    User,
    /// Bot reply.
    Bot,
    /// Resource or emergency contact.
    Resource,
}

impl Style {
    const fn prefix(self) -> &'static str {
        match self {
            Self::User => USER_PREFIX,
            Self::Bot | Self::Resource => BOT_PREFIX,
        }
    }

    const fn color(self) -> &'static str {
        match self {
            Self::User => BLUE_BOLD,
            Self::Bot => GREEN,
            Self::Resource => RED_ITALIC,
        }
    }
}

/// Writes prefixed, optionally coloured transcript lines.
///
/// Each message is followed by a blank line.
pub struct Renderer<W: Write> {
    writer: W,
    color: bool,
}

impl Renderer<Stdout> {
    /// Renders to stdout, colouring when it is a terminal unless overridden.
    #[must_use]
    pub fn stdout(color: Option<bool>) -> Self {
        let out = std::io::stdout();
        let color = color.unwrap_or_else(|| out.is_terminal());
        Self::new(out, color)
    }
}

impl<W: Write> Renderer<W> {
    /// Creates a renderer over `writer`.
    pub const fn new(writer: W, color: bool) -> Self {
        Self { writer, color }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes one message.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn message(&mut self, style: Style, text: &str) -> Result<()> {
        let marker = if style == Style::Resource && !self.color {
            RESOURCE_MARKER
        } else {
            ""
        };
        let written = if self.color {
            write!(
                self.writer,
                "{}{}{marker}{text}{RESET}\n\n",
                style.color(),
                style.prefix()
            )
        } else {
            write!(self.writer, "{}{marker}{text}\n\n", style.prefix())
        };
        written
            .and_then(|()| self.writer.flush())
            .map_err(|e| Error::op("render_message", e))
    }

    /// Echoes user input.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn user(&mut self, text: &str) -> Result<()> {
        self.message(Style::User, text)
    }

    /// Writes a bot reply.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn bot(&mut self, text: &str) -> Result<()> {
        self.message(Style::Bot, text)
    }

    /// Writes a resource line.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn resource(&mut self, text: &str) -> Result<()> {
        self.message(Style::Resource, text)
    }
}
