//! Coarse intent detection from fixed keyword lists.
//!
//! The rule is a decision list: entries are checked top-down and the first
//! entry with any keyword contained in the lowercased text wins. Overlaps are
//! resolved purely by position, so "good but I want a refund" is a purchase.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Intent category attached to each analyzed review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    Purchase,
    ReturnCancel,
    Recommendation,
    GeneralFeedback,
}

impl Intent {
    /// Human readable label shown in the UI and CLI output.
    pub fn label(self) -> &'static str {
        match self {
            Intent::Purchase => "Purchase",
            Intent::ReturnCancel => "Return/Cancel",
            Intent::Recommendation => "Recommendation",
            Intent::GeneralFeedback => "General Feedback",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered `(keywords, intent)` pairs evaluated top-down.
pub const INTENT_RULES: &[(&[&str], Intent)] = &[
    (
        &[
            "buy",
            "purchase",
            "order",
            "good",
            "very good",
            "fantastic",
            "awesome",
            "excellent",
        ],
        Intent::Purchase,
    ),
    (
        &["return", "refund", "cancel", "bad", "not good"],
        Intent::ReturnCancel,
    ),
    (&["recommend", "suggest", "refer"], Intent::Recommendation),
];

/// Map review text to an intent; `GeneralFeedback` when no rule matches.
pub fn classify_intent(text: &str) -> Intent {
    let lowered = text.to_lowercase();
    INTENT_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map(|(_, intent)| *intent)
        .unwrap_or(Intent::GeneralFeedback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_general_feedback() {
        assert_eq!(classify_intent(""), Intent::GeneralFeedback);
        assert_eq!(classify_intent("   "), Intent::GeneralFeedback);
    }

    #[test]
    fn purchase_keywords_match_case_insensitively() {
        for text in [
            "I will BUY another one",
            "Purchase went smoothly",
            "my order arrived",
            "Fantastic!",
            "awesome sound",
            "Excellent build quality",
        ] {
            assert_eq!(classify_intent(text), Intent::Purchase, "{text}");
        }
    }

    #[test]
    fn earlier_rule_wins_on_overlap() {
        assert_eq!(
            classify_intent("good but I want a refund"),
            Intent::Purchase
        );
        // "not good" contains "good", which the purchase rule sees first.
        assert_eq!(classify_intent("not good at all"), Intent::Purchase);
        assert_eq!(
            classify_intent("bad, I would not recommend it"),
            Intent::ReturnCancel
        );
    }

    #[test]
    fn return_and_recommendation_rules() {
        assert_eq!(classify_intent("Please cancel this"), Intent::ReturnCancel);
        assert_eq!(classify_intent("I suggest a smaller size"), Intent::Recommendation);
        assert_eq!(classify_intent("would refer friends"), Intent::Recommendation);
    }

    #[test]
    fn substring_matching_is_literal() {
        // "reorder" contains "order"; substring semantics are intended.
        assert_eq!(classify_intent("time to reorder"), Intent::Purchase);
        assert_eq!(classify_intent("it arrived on time"), Intent::GeneralFeedback);
    }

    #[test]
    fn labels_render_for_display() {
        assert_eq!(Intent::ReturnCancel.to_string(), "Return/Cancel");
        assert_eq!(Intent::GeneralFeedback.label(), "General Feedback");
    }
}
