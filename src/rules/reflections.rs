//! Pronoun reflection for captured text.
//!
//! Text captured from the user is echoed back from the bot's point of view:
//! "my exams" becomes "your exams", "i am" becomes "you are".
// Allow expect() on the static regex - it is built from escaped literals
#![allow(clippy::expect_used)]

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// First-person/second-person swaps applied to captured text.
pub const REFLECTIONS: &[(&str, &str)] = &[
    ("i am", "you are"),
    ("i was", "you were"),
    ("i", "you"),
    ("i'm", "you are"),
    ("i'd", "you would"),
    ("i've", "you have"),
    ("i'll", "you will"),
    ("my", "your"),
    ("you are", "I am"),
    ("you were", "I was"),
    ("you've", "I have"),
    ("you'll", "I will"),
    ("your", "my"),
    ("yours", "mine"),
    ("you", "me"),
    ("me", "you"),
];

static REFLECTION_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| REFLECTIONS.iter().copied().collect());

/// Alternation of all keys, longest first so "i am" wins over "i".
static REFLECTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let mut keys: Vec<&str> = REFLECTIONS.iter().map(|(k, _)| *k).collect();
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    let alternation = keys
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b({alternation})\b")).expect("static regex: reflections")
});

/// Lower-cases `text` and swaps first- and second-person words.
///
/// # Examples
///
/// ```
/// use haven::rules::reflect;
///
/// assert_eq!(reflect("My Exams"), "your exams");
/// assert_eq!(reflect("i am tired"), "you are tired");
/// ```
#[must_use]
pub fn reflect(text: &str) -> String {
    let lowered = text.to_lowercase();
    REFLECTION_REGEX
        .replace_all(&lowered, |caps: &regex::Captures<'_>| {
            let word = &caps[1];
            REFLECTION_MAP.get(word).copied().unwrap_or(word).to_string()
        })
        .into_owned()
}
