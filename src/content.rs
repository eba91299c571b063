//! File content reading with default-on-absent semantics.
//!
//! The indexer's collaborators cache lookups on disk; a missing cache
//! file is an expected state, not an error. These helpers return a
//! caller-supplied default in that case and tag the result with where
//! the value came from, so callers can tell a cache hit from a miss.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Where the returned content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The file existed and was read.
    File,
    /// The file was absent; the caller's default was returned.
    Default,
}

/// Read a file's exact text, or return `default` when the path is absent.
///
/// Text is returned as written, without trailing-newline normalization.
/// I/O failures other than absence propagate.
pub fn read_text(path: &Path, default: &str) -> Result<(String, Source)> {
    if !path.exists() {
        return Ok((default.to_string(), Source::Default));
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok((text, Source::File))
}

/// Read a file as structured JSON, or return `default` when the path is
/// absent. Malformed JSON is a hard error and propagates to the caller.
pub fn read_json(path: &Path, default: Value) -> Result<(Value, Source)> {
    if !path.exists() {
        return Ok((default, Source::Default));
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("malformed JSON in {}", path.display()))?;
    Ok((value, Source::File))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_text_exact_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.txt");
        std::fs::write(&path, "hello\nworld\n123").unwrap();

        let (text, source) = read_text(&path, "default").unwrap();
        assert_eq!(text, "hello\nworld\n123");
        assert_eq!(source, Source::File);
    }

    #[test]
    fn test_read_text_missing_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");

        let (text, source) = read_text(&path, "default").unwrap();
        assert_eq!(text, "default");
        assert_eq!(source, Source::Default);
    }

    #[test]
    fn test_read_json_nested() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.json");
        let expected = json!({"hello": "world", "1": {"2": "3", "4": "5"}});
        std::fs::write(&path, expected.to_string()).unwrap();

        let (value, source) = read_json(&path, json!(null)).unwrap();
        assert_eq!(value, expected);
        assert_eq!(source, Source::File);
    }

    #[test]
    fn test_read_json_missing_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let (value, source) = read_json(&path, json!({})).unwrap();
        assert_eq!(value, json!({}));
        assert_eq!(source, Source::Default);
    }

    #[test]
    fn test_read_json_malformed_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = read_json(&path, json!(null)).unwrap_err();
        assert!(err.to_string().contains("malformed JSON"));
    }
}
