//! Per-turn response orchestration.
//!
//! Resolution order for each turn:
//!
//! 1. Knowledge base: a close enough question returns its answer at once.
//!    These turns are not scored and not logged.
//! 2. Pattern table: the first matching rule produces the reply.
//! 3. Fallback: an empty or `None` rule reply is replaced by a generic
//!    follow-up prompt.
//!
//! Pattern and fallback turns are scored and appended to the conversation
//! log. A failed append is a warning; the reply is still returned.

use super::knowledge::KnowledgeBase;
use super::sentiment;
use crate::models::NewConversation;
use crate::rules::PatternTable;
use crate::storage::ConversationLog;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};

/// Generic prompts used when no rule produced a reply.
pub const FOLLOW_UPS: &[&str] = &[
    "I want to make sure I understand. Can you explain that in another way?",
    "I'm listening carefully. What else is on your mind?",
    "That's important. How has this been affecting you?",
    "glad you could share that. What would be helpful for you right now?",
];

/// Sentinel a rule reply may carry to request a fallback.
const NO_REPLY: &str = "None";

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    /// Knowledge-base answer.
    Knowledge,
    /// Pattern rule template.
    Pattern,
    /// Generic follow-up prompt.
    Fallback,
}

impl ReplySource {
    /// Returns the source as a metric label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Knowledge => "knowledge",
            Self::Pattern => "pattern",
            Self::Fallback => "fallback",
        }
    }
}

/// The outcome of one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    /// Text to show the user.
    pub text: String,
    /// Which stage produced it.
    pub source: ReplySource,
    /// Whether a conversation record was written.
    pub logged: bool,
}

/// Turns user text into replies and logs pattern-path turns.
pub struct ResponseEngine {
    knowledge: KnowledgeBase,
    rules: PatternTable,
    log: Arc<dyn ConversationLog>,
    rng: Mutex<StdRng>,
}

impl ResponseEngine {
    /// Creates an engine with the built-in rules and an OS-seeded RNG.
    #[must_use]
    pub fn new(knowledge: KnowledgeBase, log: Arc<dyn ConversationLog>) -> Self {
        Self {
            knowledge,
            rules: PatternTable::builtin(),
            log,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Replaces the rule table.
    #[must_use]
    pub fn with_rules(mut self, rules: PatternTable) -> Self {
        self.rules = rules;
        self
    }

    /// Reseeds the RNG so template and fallback choices are reproducible.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..self
        }
    }

    /// Returns the knowledge base.
    #[must_use]
    pub const fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Returns the rule table.
    #[must_use]
    pub const fn rules(&self) -> &PatternTable {
        &self.rules
    }

    /// Produces the reply for one turn.
    pub fn respond(&self, input: &str) -> Reply {
        if let Some(answer) = self.knowledge.lookup(input) {
            tracing::debug!("answered from knowledge base");
            metrics::counter!("chat_turns_total", "source" => ReplySource::Knowledge.as_str())
                .increment(1);
            return Reply {
                text: answer.to_string(),
                source: ReplySource::Knowledge,
                logged: false,
            };
        }

        let (text, source) = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            match self.rules.respond(input, &mut *rng) {
                Some(text) if !needs_fallback(&text) => (text, ReplySource::Pattern),
                _ => {
                    let prompt = FOLLOW_UPS.choose(&mut *rng).copied().unwrap_or_default();
                    (prompt.to_string(), ReplySource::Fallback)
                },
            }
        };

        let sentiment = sentiment::score(input);
        let logged = match self
            .log
            .append(&NewConversation::new(input, text.as_str(), sentiment))
        {
            Ok(id) => {
                tracing::debug!(id, sentiment, source = source.as_str(), "turn logged");
                true
            },
            Err(e) => {
                tracing::warn!(error = %e, "failed to log conversation turn");
                metrics::counter!("conversation_log_failures_total").increment(1);
                false
            },
        };
        metrics::counter!("chat_turns_total", "source" => source.as_str()).increment(1);

        Reply {
            text,
            source,
            logged,
        }
    }
}

fn needs_fallback(reply: &str) -> bool {
    reply.trim().is_empty() || reply == NO_REPLY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConversationRecord, KnowledgeEntry};
    use crate::rules::PatternRule;
    use crate::storage::MemoryStore;
    use crate::{Error, Result};

    struct FailingLog;

    impl ConversationLog for FailingLog {
        fn append(&self, _turn: &NewConversation) -> Result<i64> {
            Err(Error::op("append_conversation", "disk I/O error"))
        }

        fn recent(&self, _limit: usize) -> Result<Vec<ConversationRecord>> {
            Ok(Vec::new())
        }

        fn count(&self) -> Result<usize> {
            Ok(0)
        }
    }

    fn knowledge() -> KnowledgeBase {
        KnowledgeBase::new(vec![KnowledgeEntry::new(
            "What is anxiety?",
            "Anxiety is a feeling of worry or fear.",
        )])
    }

    #[test]
    fn test_knowledge_path_skips_log() {
        let store = Arc::new(MemoryStore::new());
        let engine = ResponseEngine::new(knowledge(), store.clone()).with_seed(1);

        let reply = engine.respond("what is anxiety");
        assert_eq!(reply.source, ReplySource::Knowledge);
        assert_eq!(reply.text, "Anxiety is a feeling of worry or fear.");
        assert!(!reply.logged);
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_blank_knowledge_answer_uses_rules() {
        let store = Arc::new(MemoryStore::new());
        let kb = KnowledgeBase::new(vec![KnowledgeEntry::new("What is anxiety?", "")]);
        let engine = ResponseEngine::new(kb, store.clone()).with_seed(1);

        let reply = engine.respond("what is anxiety");
        assert_ne!(reply.source, ReplySource::Knowledge);
        assert!(!reply.text.trim().is_empty());
        assert!(reply.logged);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_pattern_path_logs_turn() {
        let store = Arc::new(MemoryStore::new());
        let engine = ResponseEngine::new(knowledge(), store.clone()).with_seed(1);

        let reply = engine.respond("I am feeling sad and hopeless");
        assert_eq!(reply.source, ReplySource::Pattern);
        assert!(reply.text.contains("sad"));
        assert!(reply.logged);

        let records = store.recent(1).unwrap();
        assert_eq!(records[0].user_input, "I am feeling sad and hopeless");
        assert_eq!(records[0].bot_response, reply.text);
        assert_eq!(records[0].sentiment_score, -2);
    }

    #[test]
    fn test_none_sentinel_falls_back() {
        let store = Arc::new(MemoryStore::new());
        let rules = PatternTable::new(vec![PatternRule::new("(.*)", ["None"]).unwrap()]);
        let engine = ResponseEngine::new(KnowledgeBase::default(), store.clone())
            .with_rules(rules)
            .with_seed(5);

        let reply = engine.respond("anything");
        assert_eq!(reply.source, ReplySource::Fallback);
        assert!(FOLLOW_UPS.contains(&reply.text.as_str()));
        assert_eq!(store.recent(1).unwrap()[0].bot_response, reply.text);
    }

    #[test]
    fn test_no_matching_rule_falls_back() {
        let store = Arc::new(MemoryStore::new());
        let engine = ResponseEngine::new(KnowledgeBase::default(), store)
            .with_rules(PatternTable::default())
            .with_seed(5);
        assert_eq!(engine.respond("hello").source, ReplySource::Fallback);
    }

    #[test]
    fn test_log_failure_still_replies() {
        let engine = ResponseEngine::new(KnowledgeBase::default(), Arc::new(FailingLog));
        let reply = engine.respond("I feel lost today");
        assert!(!reply.text.is_empty());
        assert!(!reply.logged);
    }

    #[test]
    fn test_accessors_report_loaded_tables() {
        let engine = ResponseEngine::new(
            knowledge().with_cutoff(0.75),
            Arc::new(MemoryStore::new()),
        );
        assert_eq!(engine.knowledge().len(), 1);
        assert!((engine.knowledge().cutoff() - 0.75).abs() < f64::EPSILON);
        assert_eq!(engine.rules().len(), PatternTable::builtin().len());

        let engine = engine.with_rules(PatternTable::default());
        assert!(engine.rules().is_empty());
    }

    #[test]
    fn test_same_seed_same_replies() {
        let a = ResponseEngine::new(KnowledgeBase::default(), Arc::new(MemoryStore::new()))
            .with_seed(42);
        let b = ResponseEngine::new(KnowledgeBase::default(), Arc::new(MemoryStore::new()))
            .with_seed(42);
        for input in ["I am feeling down", "so much stress lately", "hi"] {
            assert_eq!(a.respond(input).text, b.respond(input).text);
        }
    }
}
