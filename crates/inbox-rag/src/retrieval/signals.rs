//! Keyword heuristics for email triage
//!
//! Fixed-list substring matching, same approach as the unread intent check.
//! Good enough for routing and badges; not a learned classifier.

use serde::{Deserialize, Serialize};

const URGENT_WORDS: &[&str] = &["urgent", "asap", "important", "critical", "emergency", "immediate"];

const POSITIVE_WORDS: &[&str] = &["thank", "thanks", "great", "excellent", "love", "happy", "good"];

const NEGATIVE_WORDS: &[&str] = &["sorry", "issue", "problem", "concern", "unhappy", "disappointed"];

/// Triage priority derived from email text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

/// Rough sentiment of email text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// High when the text contains any urgency keyword
pub fn priority_for(text: &str) -> Priority {
    let text = text.to_lowercase();
    if URGENT_WORDS.iter().any(|w| text.contains(w)) {
        Priority::High
    } else {
        Priority::Medium
    }
}

/// Majority vote between fixed positive and negative word lists
pub fn sentiment_for(text: &str) -> Sentiment {
    let text = text.to_lowercase();
    let positive = POSITIVE_WORDS.iter().filter(|w| text.contains(*w)).count();
    let negative = NEGATIVE_WORDS.iter().filter(|w| text.contains(*w)).count();

    if positive > negative {
        Sentiment::Positive
    } else if negative > positive {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}
