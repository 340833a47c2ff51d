//! Storage traits.
//!
//! The chat flow talks to storage only through these traits, so the engine
//! can be exercised against an in-memory store or a failing one in tests.

mod conversation;
mod resource;

pub use conversation::ConversationLog;
pub use resource::ResourceStore;
