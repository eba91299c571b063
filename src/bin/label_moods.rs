//! Classify song tags into a mood.
//!
//! Usage: label-moods [--catalog moods.json] [--tags-file tags.txt] [TAG]...
//!
//! Tags come from positional arguments and/or a file with one tag per
//! line; the winning mood and the full scoreboard are printed as JSON.

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::json;
use std::path::PathBuf;

use lyrics_index::content;
use lyrics_index::moods::{classify, MoodCatalog};

#[derive(Parser)]
#[command(name = "label-moods")]
#[command(about = "Classify free-text song tags into a mood category")]
struct Args {
    /// Tags to classify
    tags: Vec<String>,

    /// File with one tag per line, appended after positional tags
    #[arg(long)]
    tags_file: Option<PathBuf>,

    /// JSON mood catalog; falls back to the built-in catalog when the
    /// path is absent
    #[arg(long)]
    catalog: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let catalog = match &args.catalog {
        Some(path) => {
            let (value, _) = content::read_json(path, json!(null))
                .with_context(|| format!("failed to load catalog {}", path.display()))?;
            if value.is_null() {
                MoodCatalog::builtin()
            } else {
                MoodCatalog::from_json(&value)?
            }
        }
        None => MoodCatalog::builtin(),
    };

    let mut tags = args.tags;
    if let Some(path) = &args.tags_file {
        let (text, _) = content::read_text(path, "")?;
        tags.extend(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }
    if tags.is_empty() {
        bail!("no tags given (pass tags as arguments or via --tags-file)");
    }

    let result = classify(&catalog, tags.iter().map(String::as_str))
        .context("mood catalog is empty")?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
