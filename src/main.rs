use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

use lyrics_index::index::{index_lyrics, IdentityColumns};
use lyrics_index::lang::StopwordDetector;
use lyrics_index::progress::{format_duration, ProgressMode};
use lyrics_index::resolver::CachedLyricsSource;

#[derive(Parser)]
#[command(name = "index-lyrics")]
#[command(about = "Annotate a song catalog CSV with derived lyrics attributes")]
struct Args {
    /// Input catalog CSV (may be the same path as the output)
    input: PathBuf,

    /// Output catalog CSV
    output: PathBuf,

    /// Directory of cached lyrics text files (<artist___title>.txt)
    #[arg(long)]
    lyrics_dir: PathBuf,

    /// Name of the artist column
    #[arg(long, default_value = "artist")]
    artist_col: String,

    /// Name of the title column
    #[arg(long, default_value = "title")]
    title_col: String,

    /// Hide progress bars, log plain lines (for tailing from a file)
    #[arg(long)]
    log_only: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mode = ProgressMode::from_log_only(args.log_only);

    let start = Instant::now();
    println!("Indexing catalog: {:?}", args.input);

    let source = CachedLyricsSource::new(&args.lyrics_dir);
    let detector = StopwordDetector;
    let columns = IdentityColumns {
        artist: args.artist_col,
        title: args.title_col,
    };

    let stats = index_lyrics(&args.input, &args.output, &columns, &source, &detector, mode)?;
    stats.log();

    println!("\n{:=<60}", "");
    println!("Indexing complete!");
    println!("  Rows: {}", stats.total_rows);
    println!("  Already complete: {}", stats.skipped_complete);
    println!(
        "  Resolved: {} ({} with lyrics, {} without, {:.1}% hit rate)",
        stats.resolved,
        stats.lyrics_found,
        stats.lyrics_missing,
        stats.hit_rate()
    );
    println!("  Elapsed: {}", format_duration(start.elapsed()));
    println!("{:=<60}", "");

    Ok(())
}
