//! Ordered regex rule table.
//!
//! A [`PatternTable`] is a list of [`PatternRule`]s evaluated top-down; the
//! first rule whose regex matches the start of the input produces the reply.
//! Each rule carries one or more response templates. Templates refer to the
//! rule's capture groups with `%1` through `%9`; captured text is lower-cased
//! and pronoun-reflected before substitution.
//!
//! Rules are validated when built: a template that refers to a group the
//! regex does not define is rejected instead of failing at reply time.

mod builtin;
mod reflections;

pub use builtin::{BUILTIN_RULES, RuleSpec};
pub use reflections::{REFLECTIONS, reflect};

use crate::{Error, Result};
use rand::Rng;
use rand::seq::IndexedRandom;
use regex::{Captures, Regex};

/// A regular expression paired with its response templates.
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// Pattern as authored.
    source: String,
    /// Pattern compiled with a start-of-input anchor.
    regex: Regex,
    /// Response templates, at least one.
    responses: Vec<String>,
}

impl PatternRule {
    /// Builds a rule, checking the regex and every template placeholder.
    ///
    /// The regex is anchored at the start of the input, so `(.*) sad` matches
    /// "I am sad today" but `sad` alone does not. Case-insensitivity is opted
    /// into per pattern with `(?i)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if the regex does not compile, if no
    /// templates are given, or if a template references a capture group
    /// beyond the regex's group count.
    pub fn new<I, S>(pattern: &str, responses: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let regex = Regex::new(&format!(r"\A(?:{pattern})")).map_err(|e| Error::InvalidPattern {
            pattern: pattern.to_string(),
            cause: e.to_string(),
        })?;
        let responses: Vec<String> = responses.into_iter().map(Into::into).collect();

        if responses.is_empty() {
            return Err(Error::InvalidPattern {
                pattern: pattern.to_string(),
                cause: "rule has no response templates".to_string(),
            });
        }

        let groups = regex.captures_len() - 1;
        for template in &responses {
            let highest = highest_placeholder(template);
            if highest > groups {
                return Err(Error::InvalidPattern {
                    pattern: pattern.to_string(),
                    cause: format!(
                        "template references %{highest} but the pattern has {groups} group(s): {template}"
                    ),
                });
            }
        }

        Ok(Self {
            source: pattern.to_string(),
            regex,
            responses,
        })
    }

    /// Returns the pattern as authored.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.source
    }

    /// Returns the response templates.
    #[must_use]
    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    /// Number of capture groups, not counting the whole match.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.regex.captures_len() - 1
    }

    /// Matches the rule against the start of `input`.
    #[must_use]
    pub fn captures<'h>(&self, input: &'h str) -> Option<Captures<'h>> {
        self.regex.captures(input)
    }

    /// Picks a template at random and fills it from `caps`.
    fn render<R: Rng + ?Sized>(&self, caps: &Captures<'_>, rng: &mut R) -> String {
        let template = self
            .responses
            .choose(rng)
            .map_or("", String::as_str);
        tidy_punctuation(substitute(template, caps))
    }
}

/// An ordered, read-only list of rules.
#[derive(Debug, Clone, Default)]
pub struct PatternTable {
    rules: Vec<PatternRule>,
}

impl PatternTable {
    /// Creates a table from rules in priority order.
    #[must_use]
    pub const fn new(rules: Vec<PatternRule>) -> Self {
        Self { rules }
    }

    /// Builds a table from static rule specs.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::InvalidPattern`] encountered.
    pub fn from_specs(specs: &[RuleSpec]) -> Result<Self> {
        specs
            .iter()
            .map(|rule| PatternRule::new(rule.pattern, rule.responses.iter().copied()))
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    /// Returns the built-in support-conversation table.
    #[must_use]
    pub fn builtin() -> Self {
        builtin::BUILTIN_TABLE.clone()
    }

    /// Returns the rules in priority order.
    #[must_use]
    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the table has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Finds the first matching rule, returning its index and captures.
    #[must_use]
    pub fn find<'h>(&self, input: &'h str) -> Option<(usize, Captures<'h>)> {
        self.rules
            .iter()
            .enumerate()
            .find_map(|(index, rule)| rule.captures(input).map(|caps| (index, caps)))
    }

    /// Produces a reply from the first matching rule.
    ///
    /// Returns `None` only when no rule matches, which cannot happen for a
    /// table that ends in a catch-all such as `(.*)`.
    pub fn respond<R: Rng + ?Sized>(&self, input: &str, rng: &mut R) -> Option<String> {
        let (index, caps) = self.find(input)?;
        tracing::trace!(rule = index, pattern = self.rules[index].pattern(), "rule matched");
        Some(self.rules[index].render(&caps, rng))
    }
}

/// Returns the highest `%N` index referenced in a template, or 0 if none.
#[must_use]
pub fn highest_placeholder(template: &str) -> usize {
    placeholders(template).map(|(_, n)| n).max().unwrap_or(0)
}

/// Yields `(byte offset, group index)` for each `%N` in a template.
fn placeholders(template: &str) -> impl Iterator<Item = (usize, usize)> + '_ {
    template
        .char_indices()
        .zip(template.chars().skip(1))
        .filter_map(|((pos, c), next)| {
            if c == '%' {
                next.to_digit(10).map(|d| (pos, d as usize))
            } else {
                None
            }
        })
}

/// Replaces each `%N` with the reflected text of group N.
///
/// A group that did not participate in the match substitutes the empty string.
fn substitute(template: &str, caps: &Captures<'_>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    for (pos, group) in placeholders(template) {
        out.push_str(&template[last..pos]);
        if let Some(m) = caps.get(group) {
            out.push_str(&reflect(m.as_str()));
        }
        last = pos + 2;
    }
    out.push_str(&template[last..]);
    out
}

/// Collapses the doubled punctuation a substituted question can leave behind.
fn tidy_punctuation(mut reply: String) -> String {
    if reply.ends_with("?.") {
        reply.truncate(reply.len() - 2);
        reply.push('.');
    } else if reply.ends_with("??") {
        reply.truncate(reply.len() - 2);
        reply.push('?');
    }
    reply
}
