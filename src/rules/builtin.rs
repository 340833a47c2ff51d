//! Built-in support-conversation rules.
//!
//! Static rule data for [`PatternTable::builtin`](super::PatternTable::builtin).
//! Order matters: earlier rules take priority, and the final `(.*)` rule
//! catches everything the others miss.
// Allow expect() on the static table - it is validated by tests
#![allow(clippy::expect_used)]

use super::PatternTable;
use std::sync::LazyLock;

/// Static description of a rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    /// Regex source.
    pub pattern: &'static str,
    /// Response templates.
    pub responses: &'static [&'static str],
}

/// Built-in rules in priority order.
pub const BUILTIN_RULES: &[RuleSpec] = &[
    // Low mood
    RuleSpec {
        pattern: r"(?i)(.*) feeling (sad|depressed|lonely|down|exhausted|hopeless)(.*)",
        responses: &[
            "I'm really sorry you're feeling %2. That sounds really difficult. Would you like to share more about what's going on?",
            "I hear that you're feeling %2. That must be really hard. I'm here to listen if you want to talk about it.",
        ],
    },
    // Stress and anxiety
    RuleSpec {
        pattern: r"(?i)(.*) (stress|anxiety|stressed|anxious|panic|overwhelmed)(.*)",
        responses: &[
            "%2 can feel really overwhelming. Remember to breathe - you're doing great by reaching out. What specifically is causing your %2?",
            "I understand %2 can be really challenging. Would it help to talk through what's bothering you?",
        ],
    },
    // Positive mood
    RuleSpec {
        pattern: r"(?i)(.*) (happy|good|great|awesome|wonderful)(.*)",
        responses: &[
            "I'm so glad you're feeling %2! It's wonderful to hear that. What's contributing to these positive feelings?",
            "That's fantastic that you're feeling %2! Would you like to share what's bringing you joy?",
        ],
    },
    // Self-criticism
    RuleSpec {
        pattern: r"(?i)(.*) (burden|useless|worthless|stupid|not enough|failure)(.*)",
        responses: &[
            "I want you to know that your feelings are valid, but I'm concerned that you're being so hard on yourself. Would you talk to me more about why you feel this way?",
            "Hearing you say that makes me want to remind you that you matter. These thoughts can be really painful. Would you like to share what's going on?",
        ],
    },
    // Crisis language
    RuleSpec {
        pattern: r"(?i)(.*) (suicide|end it all|kill myself|don't want to live)(.*)",
        responses: &[
            "I'm really concerned about what you're saying. Your life is valuable. Please reach out to a crisis hotline immediately. In the US, you can call 988 for the Suicide & Crisis Lifeline. Would you like me to help you find local resources?",
            "I hear how much pain you're in right now. Please know you're not alone. Can I help you connect with someone who can provide more support?",
        ],
    },
    // Asking for help
    RuleSpec {
        pattern: r"(?i)(.*) (help me|need help|support)(.*)",
        responses: &[
            "I'm here to help. Can you tell me more about what kind of support you're looking for?",
            "I want to provide the right kind of support. What would be most helpful for you right now?",
        ],
    },
    // Coping
    RuleSpec {
        pattern: r"(?i)(.*) (cope|coping|deal with)(.*)",
        responses: &[
            "Coping with difficult emotions can be challenging. Some strategies include deep breathing, talking to someone you trust, or engaging in a calming activity. What usually helps you when you're struggling?",
            "Finding healthy ways to cope is so important. Would you like some suggestions for coping strategies that might help?",
        ],
    },
    // Anger
    RuleSpec {
        pattern: r"(?i)(.*) (angry|frustrated|annoyed|irritated|mad)(.*)",
        responses: &[
            "I hear that you're feeling %2. It's okay to feel this way. Would you like to talk about what's causing these feelings?",
            "Feeling %2 can be really tough. Sometimes taking deep breaths or stepping away for a moment helps. What's bothering you?",
        ],
    },
    // Fear
    RuleSpec {
        pattern: r"(?i)(.*) (scared|afraid|fearful|terrified)(.*)",
        responses: &[
            "It sounds like you're feeling %2. Fear can be overwhelming. You're safe here—would you like to share what's frightening you?",
            "I'm here with you while you feel %2. Would it help to talk through what's scaring you?",
        ],
    },
    // Loneliness
    RuleSpec {
        pattern: r"(?i)(.*) (lonely|isolated|alone)(.*)",
        responses: &[
            "Feeling %2 can be so painful. You're not alone—I'm here to listen. Would you like to talk about what's happening?",
            "I hear your loneliness. Would it help to connect with someone you trust? You matter.",
        ],
    },
    // Confusion
    RuleSpec {
        pattern: r"(?i)(.*) (confused|uncertain|lost)(.*)",
        responses: &[
            "Feeling %2 is understandable when things are unclear. Let's try to sort this out together. What's on your mind?",
            "It's okay to feel %2. Sometimes writing things down helps. Would you like to explore this more?",
        ],
    },
    // Gratitude
    RuleSpec {
        pattern: r"(?i)(.*) (grateful|thankful|appreciative)(.*)",
        responses: &[
            "It's wonderful that you're feeling %2! Gratitude can be so healing. What are you thankful for today?",
            "Celebrating these %2 feelings with you! Would you like to share what brought this on?",
        ],
    },
    // Numbness
    RuleSpec {
        pattern: r"(?i)(.*) (numb|empty|detached)(.*)",
        responses: &[
            "Feeling %2 can be really disorienting. You're not alone in this. Would you like to talk about what's happening?",
            "I hear that you're feeling %2. Sometimes our minds do this to protect us. Would it help to explore this together?",
        ],
    },
    // Catch-all
    RuleSpec {
        pattern: r"(.*)",
        responses: &[
            "I'm listening carefully. Can you tell me more about how you're feeling?",
            "I hear you. How is this affecting you?",
        ],
    },
];

/// Compiled built-in table, shared by every [`PatternTable::builtin`] call.
pub(super) static BUILTIN_TABLE: LazyLock<PatternTable> = LazyLock::new(|| {
    PatternTable::from_specs(BUILTIN_RULES).expect("static rules: built-in table")
});

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_builtin_rules_are_valid() {
        let table = PatternTable::from_specs(BUILTIN_RULES).unwrap();
        assert_eq!(table.len(), BUILTIN_RULES.len());
    }

    #[test]
    fn test_builtin_ends_with_catch_all() {
        let last = BUILTIN_RULES.last().unwrap();
        assert_eq!(last.pattern, "(.*)");
    }

    #[test]
    fn test_feeling_sad_selects_sadness_rule() {
        let table = PatternTable::builtin();
        let (index, caps) = table.find("I am feeling sad today").unwrap();
        assert_eq!(index, 0);
        assert_eq!(&caps[2], "sad");

        let mut rng = StdRng::seed_from_u64(1);
        let reply = table.respond("I am feeling sad today", &mut rng).unwrap();
        assert!(reply.contains("feeling sad."), "{reply}");
    }

    #[test]
    fn test_alternation_prefers_first_listed_keyword() {
        let table = PatternTable::builtin();
        let (index, caps) = table.find("Work has me STRESSED out").unwrap();
        assert_eq!(index, 1);
        assert_eq!(&caps[2], "STRESS");
    }

    #[test]
    fn test_unmatched_text_falls_to_catch_all() {
        let table = PatternTable::builtin();
        let (index, _) = table.find("hello there").unwrap();
        assert_eq!(index, table.len() - 1);
    }

    #[test]
    fn test_loneliness_template_text_is_verbatim() {
        let table = PatternTable::builtin();
        let replies: Vec<String> = (0..32)
            .filter_map(|seed| {
                table.respond("I feel so alone lately", &mut StdRng::seed_from_u64(seed))
            })
            .collect();
        assert!(replies.iter().any(|r| r
            == "Feeling alone can be so painful. You're not alone—I'm here to listen. Would you like to talk about what's happening?"));
        assert!(BUILTIN_RULES.iter().any(|rule| rule.responses.contains(
            &"It sounds like you're feeling %2. Fear can be overwhelming. You're safe here—would you like to share what's frightening you?"
        )));
    }
}
