//! Integration tests for haven.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use haven::config::{ChatSettings, HavenConfig};
use haven::io::{Format, create_export_sink, export_history};
use haven::models::KnowledgeEntry;
use haven::services::{KnowledgeBase, ReplySource, ResourceSuggester, ResponseEngine};
use haven::shell::{ChatShell, FAREWELL, Renderer, SessionEnd, spawn_line_reader};
use haven::storage::{ConversationLog, DEFAULT_RESOURCES, ResourceStore, SqliteStore};
use haven::Error;
use std::io::Write;
use std::sync::{Arc, Mutex};

fn knowledge() -> KnowledgeBase {
    KnowledgeBase::new(vec![
        KnowledgeEntry::new("What is anxiety?", "Anxiety is a feeling of worry or fear."),
        KnowledgeEntry::new("How can I sleep better?", "Keep a regular sleep schedule."),
    ])
}

#[test]
fn test_error_types() {
    let err = Error::InvalidInput("test message".to_string());
    let display = format!("{err}");
    assert!(display.contains("invalid input"));
    assert!(display.contains("test message"));

    let err = Error::op("append_conversation", "database is locked");
    let display = format!("{err}");
    assert!(display.contains("append_conversation"));
    assert!(display.contains("database is locked"));
}

#[test]
fn test_only_pattern_turns_are_logged() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteStore::open(dir.path().join("haven.db")).unwrap());
    let engine = ResponseEngine::new(knowledge(), store.clone()).with_seed(11);

    let turns = [
        ("what is anxiety", ReplySource::Knowledge),
        ("I am feeling sad and hopeless", ReplySource::Pattern),
        ("How can I sleep better?", ReplySource::Knowledge),
        ("work stress is too much", ReplySource::Pattern),
        ("hello", ReplySource::Pattern),
    ];
    for (input, expected) in turns {
        let reply = engine.respond(input);
        assert_eq!(reply.source, expected, "input: {input}");
        assert_eq!(reply.logged, expected != ReplySource::Knowledge);
        assert!(!reply.text.is_empty());
    }

    assert_eq!(store.count().unwrap(), 3);
    let records = store.recent(10).unwrap();
    let inputs: Vec<&str> = records.iter().map(|r| r.user_input.as_str()).collect();
    assert_eq!(
        inputs,
        ["hello", "work stress is too much", "I am feeling sad and hopeless"]
    );
    assert_eq!(records[2].sentiment_score, -2);
    assert_eq!(records[0].sentiment_score, 0);
}

#[test]
fn test_seeding_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("haven.db");

    let first = SqliteStore::open(&path).unwrap();
    assert_eq!(first.seed_resources(DEFAULT_RESOURCES).unwrap(), 18);
    drop(first);

    let second = SqliteStore::open(&path).unwrap();
    assert_eq!(second.seed_resources(DEFAULT_RESOURCES).unwrap(), 0);
    assert_eq!(second.resource_count().unwrap(), 18);
    assert_eq!(second.resources_in("crisis").unwrap().len(), 5);
}

#[test]
fn test_suggester_reads_categories_from_sqlite() {
    let store = Arc::new(SqliteStore::in_memory().unwrap());
    store.seed_resources(DEFAULT_RESOURCES).unwrap();
    let suggester = ResourceSuggester::new(store);

    let mut rng = rand::rng();
    let pick = suggester.suggest(Some("loneliness"), &mut rng).unwrap();
    assert_eq!(pick.title, "The Friendship Bench");
    assert_eq!(
        pick.suggestion_text(),
        "Here's a resource that might help: The Friendship Bench\nhttps://friendshipbenchzimbabwe.org"
    );
}

#[test]
fn test_knowledge_base_file_drives_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let config = HavenConfig::new().with_data_dir(dir.path());
    let path = config.knowledge_base_path();

    let mut kb = KnowledgeBase::load(&path).unwrap();
    assert!(kb.is_empty());
    kb.add("What is burnout?", "Exhaustion from prolonged stress.")
        .unwrap();
    kb.save(&path).unwrap();

    let store = Arc::new(SqliteStore::in_memory().unwrap());
    let engine = ResponseEngine::new(KnowledgeBase::load(&path).unwrap(), store.clone());
    let reply = engine.respond("what is burnout");
    assert_eq!(reply.text, "Exhaustion from prolonged stress.");
    assert_eq!(store.count().unwrap(), 0);
}

/// Writer shared between the test and an export sink.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

#[test]
fn test_history_export_csv() {
    let store = Arc::new(SqliteStore::in_memory().unwrap());
    let engine = ResponseEngine::new(KnowledgeBase::default(), store.clone()).with_seed(2);
    engine.respond("I feel good, better than yesterday");
    engine.respond("I am feeling sad");

    let buffer = SharedBuffer::default();
    let sink = create_export_sink(buffer.clone(), Format::Csv).unwrap();
    let written = export_history(&store.recent(10).unwrap(), sink).unwrap();
    assert_eq!(written, 2);

    let text = buffer.text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "id,created_at,sentiment_score,user_input,bot_response");
    assert!(lines[1].starts_with("2,"));
    assert!(lines[1].contains(",-1,I am feeling sad,"));
    assert!(lines[2].contains("\"I feel good, better than yesterday\""));
}

#[tokio::test]
async fn test_shell_session_against_sqlite() {
    let store = Arc::new(SqliteStore::in_memory().unwrap());
    store.seed_resources(DEFAULT_RESOURCES).unwrap();
    let engine = Arc::new(ResponseEngine::new(knowledge(), store.clone()).with_seed(5));
    let suggester = Arc::new(ResourceSuggester::new(store.clone()));
    let settings = ChatSettings {
        suggestion_probability: 1.0,
        ..ChatSettings::immediate()
    };
    let shell = ChatShell::new(engine, suggester, &settings);

    let lines = spawn_line_reader(&b"I feel so alone lately\n\nquit\n"[..]).unwrap();
    let mut renderer = Renderer::new(Vec::new(), false);
    let summary = shell
        .run(lines, &mut renderer)
        .await
        .unwrap();
    let text = String::from_utf8(renderer.into_inner()).unwrap();

    assert_eq!(summary.end, SessionEnd::Quit);
    assert_eq!(summary.turns, 1);
    assert!(text.contains("You: I feel so alone lately"));
    assert!(text.contains("Support Bot: » Here's a resource that might help: "));
    assert!(text.contains(FAREWELL));
    assert_eq!(store.count().unwrap(), 1);
}
