//! Lyrics attribute resolution.
//!
//! Given (artist, title), the resolver asks a [`LyricsSource`] for the
//! lyrics text and a [`LanguageDetector`] for the language flag, and
//! computes the four derived attributes plus the generated filename.
//! Retrieval and language detection are collaborators behind traits so
//! the pipeline can run against a file cache in production and fakes in
//! tests.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

use crate::content::{self, Source};
use crate::models::{Flag, LyricsAttributes};

/// Looks up lyrics text for a song. `Ok(None)` means "not found", a
/// first-class outcome; `Err` is reserved for real failures (I/O). No
/// retry happens here: backoff, if wanted, belongs to the source itself.
pub trait LyricsSource {
    fn lookup(&self, artist: &str, title: &str) -> Result<Option<String>>;
}

/// Classifies whether a text is in English.
pub trait LanguageDetector {
    fn is_english(&self, text: &str) -> bool;
}

// ============================================================================
// Filename Generation
// ============================================================================

/// Runs of whitespace collapse to a single underscore.
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Characters dropped outright: apostrophes and quotes, path separators,
/// and the rest of the Windows-unsafe set.
static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"['"`/\\:*?<>|]"#).unwrap());

/// Sanitize one name component for use in a filename.
/// `"I'm not in love"` becomes `"Im_not_in_love"`.
pub fn sanitize_component(name: &str) -> String {
    let dropped = UNSAFE_CHARS.replace_all(name.trim(), "");
    WHITESPACE_RUN.replace_all(&dropped, "_").to_string()
}

/// Deterministic filename identifying a song's persisted lyrics:
/// sanitized artist and title joined by a triple underscore. Generated
/// even when no lyrics exist, so every record carries a stable identity
/// for later joins.
pub fn lyrics_filename(artist: &str, title: &str) -> String {
    format!("{}___{}", sanitize_component(artist), sanitize_component(title))
}

// ============================================================================
// Resolution
// ============================================================================

/// Compute the four derived attributes for one song.
///
/// Lyrics missing is not an error: the language flag defaults to `No`
/// (there is nothing to classify) and the wordcount to zero, while the
/// filename is still generated.
pub fn resolve(
    artist: &str,
    title: &str,
    source: &dyn LyricsSource,
    detector: &dyn LanguageDetector,
) -> Result<LyricsAttributes> {
    let filename = lyrics_filename(artist, title);

    let attrs = match source.lookup(artist, title)? {
        Some(lyrics) => LyricsAttributes {
            is_english: Flag::from(detector.is_english(&lyrics)),
            lyrics_available: Flag::Yes,
            wordcount: lyrics.split_whitespace().count() as u64,
            lyrics_filename: filename,
        },
        None => LyricsAttributes {
            is_english: Flag::No,
            lyrics_available: Flag::No,
            wordcount: 0,
            lyrics_filename: filename,
        },
    };
    Ok(attrs)
}

// ============================================================================
// File-Cache Source
// ============================================================================

/// A [`LyricsSource`] backed by a directory of `<lyrics_filename>.txt`
/// files. This is what an earlier scraping pass persists; the indexer
/// only ever reads from it.
pub struct CachedLyricsSource {
    dir: PathBuf,
}

impl CachedLyricsSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the cache file for one song.
    pub fn cache_path(&self, artist: &str, title: &str) -> PathBuf {
        self.dir.join(format!("{}.txt", lyrics_filename(artist, title)))
    }
}

impl LyricsSource for CachedLyricsSource {
    fn lookup(&self, artist: &str, title: &str) -> Result<Option<String>> {
        let path = self.cache_path(artist, title);
        match content::read_text(&path, "")? {
            (text, Source::File) => Ok(Some(text)),
            (_, Source::Default) => Ok(None),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticSource(Option<&'static str>);

    impl LyricsSource for StaticSource {
        fn lookup(&self, _artist: &str, _title: &str) -> Result<Option<String>> {
            Ok(self.0.map(str::to_string))
        }
    }

    struct AlwaysEnglish;

    impl LanguageDetector for AlwaysEnglish {
        fn is_english(&self, _text: &str) -> bool {
            true
        }
    }

    #[test]
    fn test_filename_determinism() {
        assert_eq!(lyrics_filename("10cc", "I'm not in love"), "10cc___Im_not_in_love");
        // Same inputs, same output, always.
        assert_eq!(lyrics_filename("10cc", "I'm not in love"), "10cc___Im_not_in_love");
    }

    #[test]
    fn test_sanitize_component() {
        assert_eq!(sanitize_component("I'm not in love"), "Im_not_in_love");
        assert_eq!(sanitize_component("AC/DC"), "ACDC");
        assert_eq!(sanitize_component("  spaced   out  "), "spaced_out");
        assert_eq!(sanitize_component("what?"), "what");
        assert_eq!(sanitize_component("tabs\tand\nnewlines"), "tabs_and_newlines");
    }

    #[test]
    fn test_resolve_with_lyrics() {
        let source = StaticSource(Some("la la la\nla la"));
        let attrs = resolve("10cc", "I'm not in love", &source, &AlwaysEnglish).unwrap();
        assert_eq!(
            attrs,
            LyricsAttributes {
                is_english: Flag::Yes,
                lyrics_available: Flag::Yes,
                wordcount: 5,
                lyrics_filename: "10cc___Im_not_in_love".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_no_lyrics_defaults() {
        let source = StaticSource(None);
        let attrs = resolve("apple", "orange", &source, &AlwaysEnglish).unwrap();
        assert_eq!(attrs.is_english, Flag::No);
        assert_eq!(attrs.lyrics_available, Flag::No);
        assert_eq!(attrs.wordcount, 0);
        // Filename is still generated for a stable identity.
        assert_eq!(attrs.lyrics_filename, "apple___orange");
    }

    #[test]
    fn test_cached_source_hit_and_miss() {
        let dir = tempfile::tempdir().unwrap();
        let source = CachedLyricsSource::new(dir.path());
        std::fs::write(dir.path().join("10cc___Im_not_in_love.txt"), "some lyrics").unwrap();

        let hit = source.lookup("10cc", "I'm not in love").unwrap();
        assert_eq!(hit.as_deref(), Some("some lyrics"));

        let miss = source.lookup("apple", "orange").unwrap();
        assert_eq!(miss, None);
    }
}
