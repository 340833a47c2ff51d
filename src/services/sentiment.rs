//! Keyword sentiment scoring.
//!
//! A stand-in for a real sentiment model: +1 for each positive keyword token,
//! -1 for each negative one. Tokens are whitespace-separated and compared
//! after lower-casing; punctuation is not stripped, so `happy,` scores 0.

/// Tokens that add one point.
pub const POSITIVE_WORDS: &[&str] = &["happy", "good", "great", "awesome", "better", "improved"];

/// Tokens that subtract one point.
pub const NEGATIVE_WORDS: &[&str] = &["sad", "depressed", "anxious", "bad", "terrible", "hopeless"];

/// Scores `text` by keyword counts.
///
/// # Examples
///
/// ```
/// use haven::services::sentiment::score;
///
/// assert_eq!(score("I feel happy and good"), 2);
/// assert_eq!(score("I feel sad and hopeless"), -2);
/// assert_eq!(score(""), 0);
/// ```
#[must_use]
pub fn score(text: &str) -> i64 {
    text.to_lowercase()
        .split_whitespace()
        .map(|token| {
            if POSITIVE_WORDS.contains(&token) {
                1
            } else if NEGATIVE_WORDS.contains(&token) {
                -1
            } else {
                0
            }
        })
        .sum()
}
