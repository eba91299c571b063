//! Core data models for the lyrics indexing pipeline.
//!
//! This module contains the derived-field types shared by the resolver
//! and the incremental table processor, plus run instrumentation.

use serde::Serialize;

// ============================================================================
// Derived Columns
// ============================================================================

/// Name of the "lyrics are in English" column.
pub const COL_IS_ENGLISH: &str = "is_english";
/// Name of the "lyrics were found" column.
pub const COL_LYRICS_AVAILABLE: &str = "lyrics_available";
/// Name of the whitespace-token wordcount column.
pub const COL_WORDCOUNT: &str = "wordcount";
/// Name of the generated lyrics filename column.
pub const COL_LYRICS_FILENAME: &str = "lyrics_filename";

/// The four derived columns, in the order they are appended to a table
/// that does not already carry them.
pub const DERIVED_COLUMNS: [&str; 4] = [
    COL_IS_ENGLISH,
    COL_LYRICS_AVAILABLE,
    COL_WORDCOUNT,
    COL_LYRICS_FILENAME,
];

// ============================================================================
// Tri-State Flag
// ============================================================================

/// Tri-state boolean for derived columns.
///
/// The on-disk encoding is inherited from the catalog format: `-1` means
/// the row has not been processed yet, `0`/`1` are real results. Anything
/// else (including the empty string) also reads as [`Flag::Unprocessed`],
/// so a corrupted field simply triggers recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Unprocessed,
    No,
    Yes,
}

impl Flag {
    /// Parse a table field. Only the literal strings `0` and `1` produce
    /// a settled value.
    pub fn parse(field: &str) -> Self {
        match field.trim() {
            "0" => Flag::No,
            "1" => Flag::Yes,
            _ => Flag::Unprocessed,
        }
    }

    /// Serialized form: `-1`, `0` or `1`.
    pub fn as_field(self) -> &'static str {
        match self {
            Flag::Unprocessed => "-1",
            Flag::No => "0",
            Flag::Yes => "1",
        }
    }

    /// True when the flag carries a real boolean result.
    pub fn is_settled(self) -> bool {
        !matches!(self, Flag::Unprocessed)
    }
}

impl From<bool> for Flag {
    fn from(b: bool) -> Self {
        if b {
            Flag::Yes
        } else {
            Flag::No
        }
    }
}

// ============================================================================
// Resolved Attributes
// ============================================================================

/// The four derived attributes computed for one song record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricsAttributes {
    pub is_english: Flag,
    pub lyrics_available: Flag,
    pub wordcount: u64,
    pub lyrics_filename: String,
}

impl LyricsAttributes {
    /// Field values in derived-column order, ready to splice into a row.
    pub fn as_fields(&self) -> [String; 4] {
        [
            self.is_english.as_field().to_string(),
            self.lyrics_available.as_field().to_string(),
            self.wordcount.to_string(),
            self.lyrics_filename.clone(),
        ]
    }
}

// ============================================================================
// Completion Check
// ============================================================================

/// Decide whether a row's derived fields are already valid.
///
/// A row is complete iff both flags parse to a settled `0`/`1` and the
/// wordcount parses as a non-negative integer. A single bad field marks
/// the whole row incomplete; the resolver then recomputes all four
/// fields, not just the bad one. The generated filename does not
/// participate in the check.
pub fn is_complete(is_english: &str, lyrics_available: &str, wordcount: &str) -> bool {
    Flag::parse(is_english).is_settled()
        && Flag::parse(lyrics_available).is_settled()
        && wordcount.trim().parse::<u64>().is_ok()
}

// ============================================================================
// Statistics (Instrumentation)
// ============================================================================

/// Per-run indexing statistics, logged as JSON at the end of a run.
#[derive(Default, Debug, Clone, Serialize)]
pub struct IndexStats {
    pub total_rows: usize,
    /// Rows skipped because their derived fields were already valid.
    pub skipped_complete: usize,
    /// Rows sent through the resolver this run.
    pub resolved: usize,
    pub lyrics_found: usize,
    pub lyrics_missing: usize,

    // Timing
    pub elapsed_seconds: f64,
}

impl IndexStats {
    /// Fraction of resolved rows for which lyrics were found, as a percentage.
    pub fn hit_rate(&self) -> f64 {
        if self.resolved == 0 {
            0.0
        } else {
            100.0 * self.lyrics_found as f64 / self.resolved as f64
        }
    }

    /// Log stats to stderr in JSON format
    pub fn log(&self) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            eprintln!("[STATS]\n{}", json);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
