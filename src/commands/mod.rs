//! Command handlers.
//!
//! - `chat.rs`: the interactive shell
//! - `core.rs`: seed, ask, resources, emergency, history, status
//! - `kb.rs`: knowledge-base maintenance

mod chat;
mod core;
mod kb;

use clap::Subcommand;

pub use chat::cmd_chat;
pub use core::{cmd_ask, cmd_emergency, cmd_history, cmd_resources, cmd_seed, cmd_status};
pub use kb::cmd_kb;

/// Knowledge-base subcommands.
#[derive(Subcommand)]
pub enum KbAction {
    /// Append a question and answer.
    Add {
        /// The question as users might ask it.
        #[arg(short, long)]
        question: String,

        /// The answer to show.
        #[arg(short, long)]
        answer: String,
    },

    /// List every entry.
    List,

    /// Show which entry, if any, a message would match.
    Test {
        /// The message to look up.
        text: String,
    },
}
