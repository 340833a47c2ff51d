//! One-shot commands.

use haven::config::HavenConfig;
use haven::io::{Format, create_export_sink, export_history};
use haven::services::{KnowledgeBase, ResourceSuggester, ResponseEngine};
use haven::shell::{Renderer, render_emergency};
use haven::storage::{
    ConversationLog, DEFAULT_RESOURCES, MemoryStore, ResourceStore, SqliteStore,
};
use haven::{Error, Result};
use std::sync::Arc;

/// Opens the database and seeds resources on first use.
pub fn open_store(config: &HavenConfig) -> Result<Arc<SqliteStore>> {
    let store = SqliteStore::open(config.database_path())?;
    store.seed_resources(DEFAULT_RESOURCES)?;
    Ok(Arc::new(store))
}

/// Loads the knowledge base with the configured cutoff.
pub fn load_knowledge(config: &HavenConfig) -> KnowledgeBase {
    KnowledgeBase::load_or_default(&config.knowledge_base_path()).with_cutoff(config.match_cutoff)
}

/// Seeds the resource table.
pub fn cmd_seed(config: &HavenConfig) -> Result<()> {
    let store = SqliteStore::open(config.database_path())?;
    let inserted = store.seed_resources(DEFAULT_RESOURCES)?;
    if inserted == 0 {
        println!("Resources already exist in database");
    } else {
        println!("Resources database initialized ({inserted} rows)");
    }
    Ok(())
}

/// Answers one message.
pub fn cmd_ask(config: &HavenConfig, text: &str, json: bool, dry_run: bool) -> Result<()> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::InvalidInput("message is empty".to_string()));
    }

    let log: Arc<dyn ConversationLog> = if dry_run {
        Arc::new(MemoryStore::new())
    } else {
        open_store(config)?
    };
    let engine = ResponseEngine::new(load_knowledge(config), log);
    let reply = engine.respond(text);

    if json {
        let rendered =
            serde_json::to_string_pretty(&reply).map_err(|e| Error::op("serialize_reply", e))?;
        println!("{rendered}");
    } else {
        println!("{}", reply.text);
    }
    Ok(())
}

/// Lists resources, or picks one.
pub fn cmd_resources(config: &HavenConfig, category: Option<&str>, suggest: bool) -> Result<()> {
    let store = open_store(config)?;
    let mut renderer = Renderer::stdout(config.chat.color);

    if suggest {
        let suggester = ResourceSuggester::new(store);
        return match suggester.suggest(category, &mut rand::rng()) {
            Some(resource) => renderer.resource(&resource.suggestion_text()),
            None => {
                println!("No resources found.");
                Ok(())
            },
        };
    }

    let resources = match category {
        Some(category) => store.resources_in(category)?,
        None => store.all_resources()?,
    };
    if resources.is_empty() {
        println!("No resources found.");
    }
    for resource in resources {
        renderer.resource(&format!(
            "[{}] {}: {}\n{}",
            resource.category, resource.title, resource.description, resource.url
        ))?;
    }
    Ok(())
}

/// Prints the emergency contact list.
pub fn cmd_emergency(config: &HavenConfig) -> Result<()> {
    render_emergency(&mut Renderer::stdout(config.chat.color))
}

/// Prints recent conversation turns, newest first.
pub fn cmd_history(config: &HavenConfig, limit: usize, format: Format) -> Result<()> {
    let store = SqliteStore::open(config.database_path())?;
    let records = store.recent(limit)?;
    let sink = create_export_sink(std::io::stdout(), format)?;
    let written = export_history(&records, sink)?;
    tracing::debug!(written, %format, "history exported");
    Ok(())
}

/// Prints paths and counts.
pub fn cmd_status(config: &HavenConfig) -> Result<()> {
    let store = Arc::new(SqliteStore::open(config.database_path())?);
    let engine = ResponseEngine::new(load_knowledge(config), store.clone());

    println!("Haven Status");
    println!("============");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Data directory:  {}", config.data_dir.display());
    println!("Database:        {}", config.database_path().display());
    println!("Knowledge base:  {}", config.knowledge_base_path().display());
    println!();
    println!("Conversations:   {}", store.count()?);
    println!("Resources:       {}", store.resource_count()?);
    println!("User profiles:   {}", store.user_profiles()?.len());
    println!(
        "Knowledge base:  {} entries (cutoff {:.2})",
        engine.knowledge().len(),
        engine.knowledge().cutoff()
    );
    println!("Pattern rules:   {}", engine.rules().len());
    Ok(())
}
