//! Mood classification for free-text song tags.
//!
//! Matching is tiered: each mood owns canonical terms (primary match
//! words), stem terms (loose substring variants that catch morphology
//! cheaply) and exclusion terms (known false positives that contain a
//! stem as a sub-sequence but are unrelated, like a surname or compound
//! word). A tag matches a mood when it contains any canonical or stem
//! term and no exclusion term; exclusions win unconditionally.
//!
//! Classification scans every (tag, mood) pair, counts at most one hit
//! per mood per tag, and picks the highest-scoring mood. Ties go to the
//! mood registered first in the catalog.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// Catalog
// ============================================================================

/// One mood with its three ordered term tiers. Terms are lowercased at
/// construction; matching is case-insensitive.
#[derive(Debug, Clone)]
pub struct MoodCategory {
    pub name: String,
    pub canonical: Vec<String>,
    pub stems: Vec<String>,
    pub exclusions: Vec<String>,
}

impl MoodCategory {
    pub fn new<S, I>(name: &str, canonical: I, stems: I, exclusions: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        let lower = |terms: I| -> Vec<String> {
            terms
                .into_iter()
                .map(|t| {
                    let t: String = t.into();
                    t.to_lowercase()
                })
                .collect()
        };
        MoodCategory {
            name: name.to_string(),
            canonical: lower(canonical),
            stems: lower(stems),
            exclusions: lower(exclusions),
        }
    }

    /// Tiered substring match against one tag.
    ///
    /// The pattern must be contained in the tag, never the reverse: a
    /// tag that is merely a fragment of a longer canonical phrase does
    /// not match. Any exclusion hit suppresses the match regardless of
    /// canonical/stem hits.
    pub fn matches(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        if self.exclusions.iter().any(|term| tag.contains(term.as_str())) {
            return false;
        }
        self.canonical
            .iter()
            .chain(self.stems.iter())
            .any(|term| tag.contains(term.as_str()))
    }
}

/// An ordered, immutable set of mood categories. Registration order is
/// the scoreboard order and the tie-break order.
#[derive(Debug, Clone)]
pub struct MoodCatalog {
    categories: Vec<MoodCategory>,
}

impl MoodCatalog {
    pub fn new(categories: Vec<MoodCategory>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[MoodCategory] {
        &self.categories
    }

    pub fn get(&self, name: &str) -> Option<&MoodCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Load a catalog from its JSON form: a map from mood name to an
    /// ordered triple `[canonical, stems, exclusions]` of term lists.
    /// JSON objects keep insertion order here, so registration order is
    /// the file's key order.
    pub fn from_json(value: &Value) -> Result<Self> {
        let map = match value {
            Value::Object(map) => map,
            _ => bail!("mood catalog must be a JSON object"),
        };
        let mut categories = Vec::with_capacity(map.len());
        for (name, tiers) in map {
            let tiers = tiers
                .as_array()
                .with_context(|| format!("mood '{}': expected an array of term lists", name))?;
            if tiers.len() != 3 {
                bail!(
                    "mood '{}': expected [canonical, stems, exclusions], got {} lists",
                    name,
                    tiers.len()
                );
            }
            let term_list = |tier: &Value, which: &str| -> Result<Vec<String>> {
                tier.as_array()
                    .with_context(|| format!("mood '{}': {} tier is not a list", name, which))?
                    .iter()
                    .map(|t| {
                        t.as_str()
                            .map(str::to_string)
                            .with_context(|| format!("mood '{}': non-string {} term", name, which))
                    })
                    .collect()
            };
            categories.push(MoodCategory::new(
                name,
                term_list(&tiers[0], "canonical")?,
                term_list(&tiers[1], "stem")?,
                term_list(&tiers[2], "exclusion")?,
            ));
        }
        Ok(Self::new(categories))
    }

    /// The built-in catalog.
    pub fn builtin() -> Self {
        Self::new(vec![
            MoodCategory::new(
                "aggression",
                vec!["aggression", "aggressive"],
                vec!["aggress"],
                vec!["not so aggressive"],
            ),
            MoodCategory::new(
                "angst",
                vec!["angst", "anxiety", "anxious", "jumpy", "nervous", "angsty"],
                vec!["angst", "anxiety", "anxious", "jumpy", "nervous", "angsty"],
                vec!["gangst", "langstrumpf", "farangstar", "gaaangstaa", "klangstark"],
            ),
            MoodCategory::new(
                "brooding",
                vec!["brooding", "contemplative", "meditative", "reflective"],
                vec!["brood", "contemplat", "meditat", "reflect"],
                vec![
                    "broodcast",
                    "marilyn manson - the reflecting god",
                    "silverchair-reflections of a sound",
                ],
            ),
            MoodCategory::new(
                "calm",
                vec!["calm", "peaceful", "serene", "soothing", "tranquil"],
                vec!["calm", "sooth", "tranquil", "seren"],
                vec!["calamity"],
            ),
            MoodCategory::new(
                "cheerful",
                vec!["cheerful", "happy", "joyful", "upbeat", "sunny"],
                vec!["cheer", "happ", "joy"],
                vec!["unhappy", "joyless", "cheerless"],
            ),
            MoodCategory::new(
                "gloomy",
                vec!["gloomy", "sad", "melancholy", "mournful", "sorrow"],
                vec!["gloom", "melanchol", "mourn", "sorrow"],
                vec!["sadie", "sadler"],
            ),
            MoodCategory::new(
                "romantic",
                vec!["romantic", "tender", "sensual", "intimate"],
                vec!["romanc", "romant", "tender"],
                vec!["necromantic", "bartender"],
            ),
            MoodCategory::new(
                "energetic",
                vec!["energetic", "lively", "driving", "frantic"],
                vec!["energ", "frantic"],
                vec!["low energy"],
            ),
        ])
    }
}

// ============================================================================
// Scoreboard
// ============================================================================

/// Match counts for every registered mood, in catalog order. Moods with
/// zero matches are present too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Scoreboard {
    entries: Vec<ScoreEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreEntry {
    pub mood: String,
    pub count: usize,
}

impl Scoreboard {
    fn zeroed(catalog: &MoodCatalog) -> Self {
        Self {
            entries: catalog
                .categories()
                .iter()
                .map(|c| ScoreEntry {
                    mood: c.name.clone(),
                    count: 0,
                })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn get(&self, mood: &str) -> Option<usize> {
        self.entries.iter().find(|e| e.mood == mood).map(|e| e.count)
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Winning mood plus the full per-mood score breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub mood: String,
    pub scoreboard: Scoreboard,
}

/// Score a sequence of tags against the catalog.
///
/// A tag contributes at most one count per mood even when it contains
/// several of that mood's terms. The winner is the maximal count; ties
/// resolve to the mood registered first. Returns `None` only for an
/// empty catalog, which has no winner to name.
pub fn classify<'a, I>(catalog: &MoodCatalog, tags: I) -> Option<Classification>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut scoreboard = Scoreboard::zeroed(catalog);
    for tag in tags {
        for (category, entry) in catalog.categories().iter().zip(&mut scoreboard.entries) {
            if category.matches(tag) {
                entry.count += 1;
            }
        }
    }

    // Strictly-greater scan in catalog order: earlier moods win ties.
    let mut winner: Option<&ScoreEntry> = None;
    for entry in &scoreboard.entries {
        if winner.map_or(true, |best| entry.count > best.count) {
            winner = Some(entry);
        }
    }

    winner.map(|entry| Classification {
        mood: entry.mood.clone(),
        scoreboard: scoreboard.clone(),
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn angst() -> MoodCategory {
        MoodCatalog::builtin().get("angst").unwrap().clone()
    }

    #[test]
    fn test_canonical_match() {
        assert!(angst().matches("nervous"));
        assert!(angst().matches("so very NERVOUS today"));
    }

    #[test]
    fn test_stem_match() {
        let brooding = MoodCatalog::builtin().get("brooding").unwrap().clone();
        assert!(brooding.matches("broodccast"));
        assert!(brooding.matches("meditation"));
    }

    #[test]
    fn test_containment_direction() {
        // The pattern must be inside the tag; a truncated tag does not match.
        assert!(!angst().matches("nervou"));
    }

    #[test]
    fn test_exclusion_suppression() {
        // "gangst" contains "angst" but is a registered exclusion.
        assert!(!angst().matches("gangst"));
        assert!(!angst().matches("langstrumpf"));
    }

    #[test]
    fn test_exclusion_beats_canonical() {
        let aggression = MoodCatalog::builtin().get("aggression").unwrap().clone();
        // Contains the canonical term "aggressive" yet the exclusion wins.
        assert!(!aggression.matches("not so aggressive"));
        assert!(aggression.matches("not so aggressss"));
    }

    #[test]
    fn test_scoreboard_contains_every_mood() {
        let catalog = MoodCatalog::builtin();
        let result = classify(&catalog, ["nervous"]).unwrap();
        assert_eq!(result.scoreboard.entries().len(), catalog.len());
        assert_eq!(result.scoreboard.get("aggression"), Some(0));
        assert_eq!(result.scoreboard.get("angst"), Some(1));
    }

    #[test]
    fn test_tag_counts_once_per_mood() {
        // "angsty" hits both the canonical and the stem tier of angst;
        // it still counts a single time.
        let catalog = MoodCatalog::builtin();
        let result = classify(&catalog, ["angsty"]).unwrap();
        assert_eq!(result.scoreboard.get("angst"), Some(1));
    }

    #[test]
    fn test_tie_break_is_catalog_order() {
        let catalog = MoodCatalog::new(vec![
            MoodCategory::new("first", vec!["alpha"], vec![], vec![]),
            MoodCategory::new("second", vec!["beta"], vec![], vec![]),
        ]);
        let result = classify(&catalog, ["alpha", "beta"]).unwrap();
        assert_eq!(result.scoreboard.get("first"), Some(1));
        assert_eq!(result.scoreboard.get("second"), Some(1));
        assert_eq!(result.mood, "first");
    }

    #[test]
    fn test_empty_catalog_has_no_winner() {
        let catalog = MoodCatalog::new(vec![]);
        assert!(classify(&catalog, ["anything"]).is_none());
    }

    #[test]
    fn test_classify_fixture() {
        let catalog = MoodCatalog::builtin();
        let tags = [
            // aggression: 2
            "aggressiiiiive",
            "not so aggressive",
            "not so aggressss",
            // angst: 2
            "jumpy",
            "nervou",
            "nervous",
            "gangst",
            "langstrumpf",
            // brooding: 3
            "marilyn manson",
            "broodccast",
            "broodcast",
            "contemplative",
            "meditation",
        ];
        let result = classify(&catalog, tags).unwrap();
        assert_eq!(result.mood, "brooding");
        assert_eq!(result.scoreboard.get("aggression"), Some(2));
        assert_eq!(result.scoreboard.get("angst"), Some(2));
        assert_eq!(result.scoreboard.get("brooding"), Some(3));
        // Every other registered mood is present with a zero count.
        for entry in result.scoreboard.entries() {
            if !["aggression", "angst", "brooding"].contains(&entry.mood.as_str()) {
                assert_eq!(entry.count, 0, "mood {}", entry.mood);
            }
        }
    }

    #[test]
    fn test_catalog_from_json() {
        let value = json!({
            "angst": [
                ["angst", "nervous"],
                ["angst"],
                ["gangst"]
            ],
            "brooding": [
                ["brooding"],
                ["brood"],
                []
            ]
        });
        let catalog = MoodCatalog::from_json(&value).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.categories()[0].name, "angst");
        assert!(catalog.get("angst").unwrap().matches("nervous"));
        assert!(!catalog.get("angst").unwrap().matches("gangst"));
    }

    #[test]
    fn test_catalog_from_json_rejects_bad_shape() {
        assert!(MoodCatalog::from_json(&json!(["not", "a", "map"])).is_err());
        assert!(MoodCatalog::from_json(&json!({"m": [["a"], ["b"]]})).is_err());
        assert!(MoodCatalog::from_json(&json!({"m": [["a"], ["b"], [1]]})).is_err());
    }

    #[test]
    fn test_terms_lowercased_at_construction() {
        let cat = MoodCategory::new("x", vec!["LOUD"], vec![], vec![]);
        assert!(cat.matches("loud noises"));
        assert!(cat.matches("LOUD NOISES"));
    }
}
