//! Interactive chat command.

use super::core::{load_knowledge, open_store};
use haven::config::HavenConfig;
use haven::services::{ResourceSuggester, ResponseEngine};
use haven::shell::{self, ChatShell, Renderer, SessionEnd};
use haven::Result;
use std::sync::Arc;

/// Runs the chat shell on stdin and stdout.
pub async fn cmd_chat(config: &HavenConfig) -> Result<()> {
    let store = open_store(config)?;
    let engine = Arc::new(ResponseEngine::new(load_knowledge(config), store.clone()));
    let suggester = Arc::new(ResourceSuggester::new(store));

    let chat = ChatShell::new(engine, suggester, &config.chat);
    let mut renderer = Renderer::stdout(config.chat.color);
    let summary = chat.run(shell::stdin_lines()?, &mut renderer).await?;

    if summary.end == SessionEnd::EndOfInput {
        println!();
    }
    Ok(())
}
