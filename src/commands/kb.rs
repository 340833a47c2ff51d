//! Knowledge-base commands.

use super::KbAction;
use haven::Result;
use haven::config::HavenConfig;
use haven::services::KnowledgeBase;

/// Runs a knowledge-base subcommand.
pub fn cmd_kb(config: &HavenConfig, action: KbAction) -> Result<()> {
    let path = config.knowledge_base_path();
    // A malformed file is an error here rather than an empty base, so `add`
    // never overwrites it.
    let mut knowledge = KnowledgeBase::load(&path)?.with_cutoff(config.match_cutoff);

    match action {
        KbAction::Add { question, answer } => {
            knowledge.add(&question, &answer)?;
            knowledge.save(&path)?;
            println!(
                "Added entry {} to {}",
                knowledge.len(),
                path.display()
            );
        },
        KbAction::List => {
            if knowledge.is_empty() {
                println!("Knowledge base is empty: {}", path.display());
            }
            for (i, entry) in knowledge.entries().iter().enumerate() {
                println!("{}. {}\n   {}", i + 1, entry.question, entry.answer);
            }
        },
        KbAction::Test { text } => match knowledge.closest_question(&text) {
            Some(question) => {
                println!("Matched: {question}");
                println!("{}", knowledge.answer_for(question).unwrap_or_default());
            },
            None => println!("No match at cutoff {:.2}", knowledge.cutoff()),
        },
    }
    Ok(())
}
