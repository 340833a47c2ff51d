//! Off-loop turn processing.
//!
//! Each turn computes its reply on the blocking pool, then queues the
//! reply and an optional resource follow-up back to the shell loop after
//! their display delays. The worker never writes to the display.

use crate::config::ChatSettings;
use crate::services::{ResourceSuggester, ResponseEngine};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Message from a turn worker to the shell loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    /// Bot reply to show.
    Reply(String),
    /// Resource follow-up to show.
    Suggestion(String),
    /// The turn has queued everything it will queue.
    TurnDone,
}

/// Shared state for turn workers.
#[derive(Clone)]
pub struct TurnWorker {
    engine: Arc<ResponseEngine>,
    suggester: Arc<ResourceSuggester>,
    reply_delay: Duration,
    suggestion_delay: Duration,
    suggestion_probability: f64,
}

impl TurnWorker {
    /// Creates a worker.
    pub fn new(
        engine: Arc<ResponseEngine>,
        suggester: Arc<ResourceSuggester>,
        settings: &ChatSettings,
    ) -> Self {
        Self {
            engine,
            suggester,
            reply_delay: Duration::from_millis(settings.reply_delay_ms),
            suggestion_delay: Duration::from_millis(settings.suggestion_delay_ms),
            suggestion_probability: settings.suggestion_probability.clamp(0.0, 1.0),
        }
    }

    /// Starts one turn in the background.
    ///
    /// Always ends with [`ShellEvent::TurnDone`], even if the blocking task
    /// fails.
    pub fn dispatch(&self, input: String, events: UnboundedSender<ShellEvent>) {
        let worker = self.clone();
        tokio::spawn(async move {
            let started = tokio::time::Instant::now();
            let blocking = worker.clone();
            let turn = tokio::task::spawn_blocking(move || blocking.compute(&input)).await;

            match turn {
                Ok((reply, suggestion)) => {
                    tokio::time::sleep_until(started + worker.reply_delay).await;
                    let _ = events.send(ShellEvent::Reply(reply));
                    if let Some(text) = suggestion {
                        tokio::time::sleep_until(started + worker.suggestion_delay).await;
                        let _ = events.send(ShellEvent::Suggestion(text));
                    }
                },
                Err(e) => tracing::error!(error = %e, "turn worker failed"),
            }
            let _ = events.send(ShellEvent::TurnDone);
        });
    }

    /// Computes the reply and, with the configured probability, a
    /// resource suggestion.
    fn compute(&self, input: &str) -> (String, Option<String>) {
        let reply = self.engine.respond(input);
        tracing::info!(
            source = reply.source.as_str(),
            logged = reply.logged,
            "turn answered"
        );

        let mut rng = rand::rng();
        let suggestion = rng
            .random_bool(self.suggestion_probability)
            .then(|| self.suggester.suggest(None, &mut rng))
            .flatten()
            .map(|resource| resource.suggestion_text());

        (reply.text, suggestion)
    }
}
