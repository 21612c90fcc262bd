//! Content-driven caption styling.
//!
//! A caption is styled as a whole: one emphasis word anywhere in the text is
//! enough to render the entire caption in the emphasis style.

use crate::types::Style;
use std::collections::{BTreeSet, HashSet};

/// Built-in words that mark a caption as emphasis.
pub const DEFAULT_EMPHASIS_WORDS: &[&str] = &[
    "wow", "shocking", "unbelievable", "insane", "crazy", "secret", "revealed", "exclusive",
    "viral", "legendary", "epic", "mind-blowing", "unreal", "amazing", "incredible",
    "unexpected", "rare", "hidden", "must-see", "top", "ultimate", "best", "wild", "funny",
    "hilarious", "breaking", "alert", "warning", "stop", "wait", "omg", "wtf", "no-way",
    "game-changer", "hack", "trick", "tip", "proven", "official", "first", "last", "limited",
    "challenge", "dare", "trending", "for-you", "now", "right-now", "today", "instantly", "fast",
    "quick", "easy", "free", "win", "lose", "fail", "success", "power", "boost", "unlock",
    "behind-the-scenes", "true-story", "real-life", "fact", "secret-sauce", "gosh", "holy",
    "damn", "heck", "jeez", "whoa",
];

/// Built-in hedging words that mark a caption as qualifier.
pub const DEFAULT_QUALIFIER_WORDS: &[&str] = &[
    "like", "feel", "think", "seem", "appear", "look", "sound", "taste", "smell", "maybe",
    "perhaps", "possibly", "probably", "might", "could", "would", "should", "almost", "nearly",
    "about", "around", "roughly", "approximately",
];

/// Lowercase a word and strip every non-alphanumeric char at either end.
///
/// Covers Unicode marks like `…`, `—` and curly quotes. Inner punctuation is
/// kept so hyphenated entries like `mind-blowing` match.
pub fn normalize(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

/// Classifies caption text by word-set membership.
#[derive(Clone, Debug, Default)]
pub struct StyleClassifier {
    emphasis: HashSet<String>,
    qualifier: HashSet<String>,
}

impl StyleClassifier {
    /// Build a classifier; set entries are normalized the same way as text.
    pub fn new<'a, E, Q>(emphasis: E, qualifier: Q) -> Self
    where
        E: IntoIterator<Item = &'a str>,
        Q: IntoIterator<Item = &'a str>,
    {
        Self {
            emphasis: emphasis.into_iter().map(normalize).collect(),
            qualifier: qualifier.into_iter().map(normalize).collect(),
        }
    }

    pub fn from_sets(emphasis: &BTreeSet<String>, qualifier: &BTreeSet<String>) -> Self {
        Self::new(
            emphasis.iter().map(String::as_str),
            qualifier.iter().map(String::as_str),
        )
    }

    /// Emphasis beats qualifier, anything else is default.
    pub fn classify(&self, text: &str) -> Style {
        let words: Vec<String> = text.split_whitespace().map(normalize).collect();

        if words.iter().any(|w| self.emphasis.contains(w)) {
            Style::Emphasis
        } else if words.iter().any(|w| self.qualifier.contains(w)) {
            Style::Qualifier
        } else {
            Style::Default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> StyleClassifier {
        StyleClassifier::new(["wow", "secret"], ["like", "maybe"])
    }

    #[test]
    fn plain_text_is_default() {
        assert_eq!(classifier().classify("we went home"), Style::Default);
    }

    #[test]
    fn one_emphasis_word_tags_whole_caption() {
        assert_eq!(classifier().classify("the big secret is out"), Style::Emphasis);
    }

    #[test]
    fn emphasis_beats_qualifier() {
        assert_eq!(classifier().classify("maybe wow"), Style::Emphasis);
    }

    #[test]
    fn qualifier_without_emphasis() {
        assert_eq!(classifier().classify("it was, like, fine"), Style::Qualifier);
    }

    #[test]
    fn ignores_case_and_trailing_punctuation() {
        let c = classifier();

        assert_eq!(c.classify("Like,"), c.classify("like"));
        assert_eq!(c.classify("WOW!!!"), Style::Emphasis);
        assert_eq!(c.classify("\"Secret.\""), Style::Emphasis);
    }

    #[test]
    fn ignores_unicode_punctuation_at_edges() {
        let c = classifier();

        assert_eq!(c.classify("wow…"), Style::Emphasis);
        assert_eq!(c.classify("“wow”"), Style::Emphasis);
        assert_eq!(c.classify("wow—"), Style::Emphasis);
        assert_eq!(c.classify("like…"), Style::Qualifier);
        assert_eq!(c.classify("¿maybe?"), Style::Qualifier);
    }

    #[test]
    fn keeps_inner_hyphen() {
        let c = StyleClassifier::new(DEFAULT_EMPHASIS_WORDS.iter().copied(), []);

        assert_eq!(c.classify("totally mind-blowing!"), Style::Emphasis);
        assert_eq!(c.classify("mind blowing"), Style::Default);
    }

    #[test]
    fn empty_sets_classify_everything_default() {
        assert_eq!(StyleClassifier::default().classify("wow like"), Style::Default);
    }

    #[test]
    fn set_entries_are_normalized() {
        let c = StyleClassifier::new(["Boom!"], []);

        assert_eq!(c.classify("boom"), Style::Emphasis);
    }
}
