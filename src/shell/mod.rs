//! Interactive terminal chat.
//!
//! The loop reads input lines, worker events and Ctrl-C concurrently. Only
//! the loop writes to the transcript; turns run on the blocking pool and
//! report back over a channel.

pub mod emergency;
mod input;
mod render;
mod worker;

pub use emergency::{EmergencyContact, GLOBAL_CONTACTS, INDIA_CONTACTS, render_emergency};
pub use input::{LineReceiver, spawn_line_reader, stdin_lines};
pub use render::{Renderer, Style};
pub use worker::{ShellEvent, TurnWorker};

use crate::config::ChatSettings;
use crate::services::{ResourceSuggester, ResponseEngine};
use crate::{Error, Result};
use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Opening message.
pub const GREETING: &str = "Hello, I'm here to listen and support you. How are you feeling today?";

/// Closing message.
pub const FAREWELL: &str = "Thank you for chatting. Remember to be kind to yourself. You can always come back if you need to talk.";

/// Shown by `/help`.
pub const HELP: &str = "Commands:\n  /emergency (or /sos)  show emergency helplines\n  /help                 show this list\n  quit                  end the chat";

/// One line of user input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line.
    Empty,
    /// End the session.
    Quit,
    /// Show emergency contacts.
    Emergency,
    /// Show shell commands.
    Help,
    /// Chat text, trimmed.
    Message(String),
}

impl Command {
    /// Classifies a raw input line.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let text = line.trim();
        if text.is_empty() {
            return Self::Empty;
        }
        match text.to_lowercase().as_str() {
            "quit" => Self::Quit,
            "/emergency" | "/sos" => Self::Emergency,
            "/help" => Self::Help,
            _ => Self::Message(text.to_string()),
        }
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user typed `quit`.
    Quit,
    /// Input closed.
    EndOfInput,
    /// Ctrl-C.
    Interrupted,
}

/// Summary returned when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// How the session ended.
    pub end: SessionEnd,
    /// Chat turns dispatched.
    pub turns: usize,
}

/// The interactive chat shell.
pub struct ChatShell {
    worker: TurnWorker,
    quit_delay: Duration,
}

impl ChatShell {
    /// Creates a shell.
    #[must_use]
    pub fn new(
        engine: Arc<ResponseEngine>,
        suggester: Arc<ResourceSuggester>,
        settings: &ChatSettings,
    ) -> Self {
        Self {
            worker: TurnWorker::new(engine, suggester, settings),
            quit_delay: Duration::from_millis(settings.quit_delay_ms),
        }
    }

    /// Runs a session until `quit`, end of input, or Ctrl-C.
    ///
    /// Turns still in flight are rendered before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing the transcript fails.
    pub async fn run<W: Write>(
        &self,
        lines: LineReceiver,
        renderer: &mut Renderer<W>,
    ) -> Result<SessionSummary> {
        self.run_until(lines, ctrl_c(), renderer).await
    }

    /// Runs a session that `interrupt` ends the way Ctrl-C does.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing the transcript fails.
    pub async fn run_until<W, F>(
        &self,
        mut lines: LineReceiver,
        interrupt: F,
        renderer: &mut Renderer<W>,
    ) -> Result<SessionSummary>
    where
        W: Write,
        F: Future<Output = ()>,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tokio::pin!(interrupt);
        let mut in_flight = 0usize;
        let mut turns = 0usize;

        renderer.bot(GREETING)?;
        tracing::info!("chat session started");

        let end = loop {
            tokio::select! {
                line = lines.recv() => {
                    let Some(line) = line.transpose().map_err(|e| Error::op("read_input", e))? else {
                        break SessionEnd::EndOfInput;
                    };
                    match Command::parse(&line) {
                        Command::Empty => {},
                        Command::Quit => break SessionEnd::Quit,
                        Command::Emergency => render_emergency(renderer)?,
                        Command::Help => renderer.bot(HELP)?,
                        Command::Message(text) => {
                            renderer.user(&text)?;
                            self.worker.dispatch(text, tx.clone());
                            in_flight += 1;
                            turns += 1;
                        },
                    }
                },
                Some(event) = rx.recv() => render_event(event, renderer, &mut in_flight)?,
                () = &mut interrupt => break SessionEnd::Interrupted,
            }
        };
        drop(lines);

        match end {
            SessionEnd::EndOfInput => drain(&mut rx, renderer, &mut in_flight).await?,
            SessionEnd::Quit | SessionEnd::Interrupted => {
                renderer.bot(FAREWELL)?;
                let (_, drained) = tokio::join!(
                    tokio::time::sleep(self.quit_delay),
                    drain(&mut rx, renderer, &mut in_flight)
                );
                drained?;
            },
        }

        tracing::info!(?end, turns, "chat session ended");
        Ok(SessionSummary { end, turns })
    }
}

/// Resolves on Ctrl-C. Never resolves if the signal cannot be watched.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

fn render_event<W: Write>(
    event: ShellEvent,
    renderer: &mut Renderer<W>,
    in_flight: &mut usize,
) -> Result<()> {
    match event {
        ShellEvent::Reply(text) => renderer.bot(&text),
        ShellEvent::Suggestion(text) => renderer.resource(&text),
        ShellEvent::TurnDone => {
            *in_flight = in_flight.saturating_sub(1);
            Ok(())
        },
    }
}

/// Renders events until every dispatched turn has finished.
async fn drain<W: Write>(
    rx: &mut UnboundedReceiver<ShellEvent>,
    renderer: &mut Renderer<W>,
    in_flight: &mut usize,
) -> Result<()> {
    while *in_flight > 0 {
        let Some(event) = rx.recv().await else {
            break;
        };
        render_event(event, renderer, in_flight)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::KnowledgeBase;
    use crate::storage::{ConversationLog, MemoryStore};
    use test_case::test_case;

    #[test_case("  ", Command::Empty; "blank")]
    #[test_case("QUIT", Command::Quit; "quit any case")]
    #[test_case(" quit ", Command::Quit; "quit trimmed")]
    #[test_case("/sos", Command::Emergency; "sos alias")]
    #[test_case("/Emergency", Command::Emergency; "emergency")]
    #[test_case("/help", Command::Help; "help")]
    #[test_case("  I quit my job ", Command::Message("I quit my job".to_string()); "message trimmed")]
    fn test_command_parse(line: &str, expected: Command) {
        assert_eq!(Command::parse(line), expected);
    }

    fn shell(store: &Arc<MemoryStore>) -> ChatShell {
        let engine = ResponseEngine::new(KnowledgeBase::default(), store.clone()).with_seed(3);
        let settings = ChatSettings {
            suggestion_probability: 0.0,
            ..ChatSettings::immediate()
        };
        ChatShell::new(
            Arc::new(engine),
            Arc::new(ResourceSuggester::new(store.clone())),
            &settings,
        )
    }

    async fn session(store: &Arc<MemoryStore>, input: &str) -> (SessionSummary, String) {
        let lines = spawn_line_reader(std::io::Cursor::new(input.to_string())).unwrap();
        let mut renderer = Renderer::new(Vec::new(), false);
        let summary = shell(store)
            .run_until(lines, std::future::pending(), &mut renderer)
            .await
            .unwrap();
        (summary, String::from_utf8(renderer.into_inner()).unwrap())
    }

    #[tokio::test]
    async fn test_quit_says_farewell() {
        let store = Arc::new(MemoryStore::new());
        let (summary, text) = session(&store, "quit\nI am sad\n").await;
        assert_eq!(summary.end, SessionEnd::Quit);
        assert_eq!(summary.turns, 0);
        assert!(text.starts_with(&format!("Support Bot: {GREETING}")));
        assert!(text.trim_end().ends_with(FAREWELL));
        assert!(!text.contains("You: I am sad"));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_blank_lines_are_ignored() {
        let store = Arc::new(MemoryStore::new());
        let (summary, text) = session(&store, "\n   \n").await;
        assert_eq!(summary.end, SessionEnd::EndOfInput);
        assert_eq!(summary.turns, 0);
        assert!(!text.contains("You:"));
    }

    #[tokio::test]
    async fn test_turn_reply_rendered_before_exit() {
        let store = Arc::new(MemoryStore::new());
        let (summary, text) = session(&store, "I am feeling sad\n").await;
        assert_eq!(summary.turns, 1);

        let echo = text.find("You: I am feeling sad").unwrap();
        let reply = text[echo..].find("Support Bot: ").unwrap();
        assert!(reply > 0);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_emergency_command_skips_engine() {
        let store = Arc::new(MemoryStore::new());
        let (summary, text) = session(&store, "/emergency\n").await;
        assert_eq!(summary.turns, 0);
        assert!(text.contains("Here are emergency resources in India:"));
        assert!(text.contains("» Crisis Text Line: Text HOME to 741741"));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_interrupt_ends_session_while_input_is_open() {
        let store = Arc::new(MemoryStore::new());
        let (line_tx, lines) = mpsc::unbounded_channel();
        line_tx.send(Ok("I am feeling sad".to_string())).unwrap();
        let mut renderer = Renderer::new(Vec::new(), false);

        let summary = tokio::time::timeout(
            Duration::from_secs(5),
            shell(&store).run_until(
                lines,
                tokio::time::sleep(Duration::from_millis(200)),
                &mut renderer,
            ),
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(summary.end, SessionEnd::Interrupted);
        assert_eq!(summary.turns, 1);
        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(text.contains("You: I am feeling sad"));
        assert!(text.contains(FAREWELL));
        assert_eq!(store.count().unwrap(), 1);
        drop(line_tx);
    }

    #[tokio::test]
    async fn test_read_error_ends_session() {
        let store = Arc::new(MemoryStore::new());
        let (line_tx, lines) = mpsc::unbounded_channel();
        line_tx
            .send(Err(std::io::Error::other("terminal went away")))
            .unwrap();
        let mut renderer = Renderer::new(Vec::new(), false);
        let result = shell(&store)
            .run_until(lines, std::future::pending(), &mut renderer)
            .await;
        assert!(matches!(result, Err(Error::OperationFailed { .. })));
    }
}
