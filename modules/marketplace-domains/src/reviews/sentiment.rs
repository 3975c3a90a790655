//! Keyword sentiment for review text.
//!
//! Case-insensitive substring match against two fixed word lists. The
//! positive list is checked first, so text containing words from both lists
//! is positive.

use serde::{Deserialize, Serialize};

pub const POSITIVE_WORDS: &[&str] = &["good", "great", "excellent", "happy"];
pub const NEGATIVE_WORDS: &[&str] = &["bad", "poor", "unhappy", "terrible"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

pub fn classify(text: &str) -> Sentiment {
    let lower = text.to_lowercase();
    if POSITIVE_WORDS.iter().any(|w| lower.contains(w)) {
        return Sentiment::Positive;
    }
    if NEGATIVE_WORDS.iter().any(|w| lower.contains(w)) {
        return Sentiment::Negative;
    }
    Sentiment::Neutral
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_examples() {
        assert_eq!(classify("This is a great product"), Sentiment::Positive);
        assert_eq!(classify("Terrible and poor quality"), Sentiment::Negative);
        assert_eq!(classify("It arrived on Tuesday"), Sentiment::Neutral);
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(classify("EXCELLENT fit"), Sentiment::Positive);
        assert_eq!(classify("Pretty BAD stitching"), Sentiment::Negative);
    }

    #[test]
    fn positive_wins_when_both_lists_match() {
        assert_eq!(classify("good price, terrible box"), Sentiment::Positive);
    }

    #[test]
    fn substrings_count() {
        // "unhappy" contains "happy", which is checked first.
        assert_eq!(classify("unhappy with it"), Sentiment::Positive);
        assert_eq!(classify("badly packed"), Sentiment::Negative);
    }
}
