//! Stopword-based English detection.
//!
//! A small self-contained heuristic: the fraction of tokens that are
//! common English function words is a strong signal for song lyrics,
//! which lean heavily on pronouns and auxiliaries. Good enough for a
//! batch flag; swap in a real classifier through [`LanguageDetector`]
//! if higher accuracy is needed.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

use crate::resolver::LanguageDetector;

/// Minimum stopword fraction to call a text English.
const STOPWORD_RATIO_THRESHOLD: f64 = 0.18;

static ENGLISH_STOPWORDS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "if", "of", "to", "in", "on", "at", "for",
        "with", "by", "from", "up", "down", "out", "off", "over", "under", "again",
        "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them",
        "my", "your", "his", "its", "our", "their", "mine", "yours",
        "is", "am", "are", "was", "were", "be", "been", "being",
        "do", "does", "did", "have", "has", "had", "will", "would", "can", "could",
        "shall", "should", "may", "might", "must",
        "no", "not", "so", "this", "that", "these", "those", "there", "here",
        "what", "when", "where", "who", "why", "how", "all", "any", "some", "now",
        "im", "ive", "ill", "dont", "cant", "wont", "aint", "youre", "lets",
        "oh", "yeah", "baby", "love", "know", "like", "never", "gonna", "wanna",
    ]
    .into_iter()
    .collect()
});

/// [`LanguageDetector`] implementation based on stopword density.
#[derive(Debug, Default, Clone, Copy)]
pub struct StopwordDetector;

impl StopwordDetector {
    /// Fraction of tokens that are English stopwords, in `[0, 1]`.
    /// Tokens are lowercased and stripped of non-alphabetic characters
    /// before lookup, so "Don't," still counts as "dont".
    pub fn stopword_ratio(text: &str) -> f64 {
        let mut total = 0usize;
        let mut hits = 0usize;
        for token in text.split_whitespace() {
            let word: String = token
                .chars()
                .filter(|c| c.is_ascii_alphabetic())
                .collect::<String>()
                .to_lowercase();
            if word.is_empty() {
                continue;
            }
            total += 1;
            if ENGLISH_STOPWORDS.contains(word.as_str()) {
                hits += 1;
            }
        }
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

impl LanguageDetector for StopwordDetector {
    fn is_english(&self, text: &str) -> bool {
        Self::stopword_ratio(text) >= STOPWORD_RATIO_THRESHOLD
    }
}

// ============================================================================
// TESTS
// ============================================================================
