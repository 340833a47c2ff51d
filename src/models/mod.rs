//! Data models for haven.
//!
//! Plain records shared by the storage layer, the services, and the shell.

mod conversation;
mod knowledge;
mod profile;
mod resource;

pub use conversation::{ConversationRecord, NewConversation};
pub use knowledge::{KnowledgeDocument, KnowledgeEntry};
pub use profile::UserProfile;
pub use resource::{NewResource, ResourceEntry};
