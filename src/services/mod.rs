//! Chat services.
//!
//! - [`KnowledgeBase`]: fuzzy question/answer lookup
//! - [`ResponseEngine`]: per-turn orchestration and logging
//! - [`ResourceSuggester`]: random help resources
//! - [`sentiment`]: keyword sentiment score
//! - [`similarity`]: sequence-matching ratio

pub mod knowledge;
mod resources;
mod responder;
pub mod sentiment;
pub mod similarity;

pub use knowledge::{DEFAULT_MATCH_CUTOFF, DocumentFormat, KnowledgeBase};
pub use resources::ResourceSuggester;
pub use responder::{FOLLOW_UPS, Reply, ReplySource, ResponseEngine};
