// Sticker album tracker - headless CLI operations

mod exit_codes;
mod fetch;
mod scan;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use album_core::{AddRequest, Collection, StickerId, TOTAL_STICKERS};
use album_recon::ExchangeReport;
use album_store::LoadReport;

use exit_codes::{EXIT_FETCH, EXIT_STORE, EXIT_SUCCESS, EXIT_USAGE, EXIT_VALIDATION};

#[derive(Parser)]
#[command(name = "album")]
#[command(about = "Sticker album progress tracker and exchange finder")]
#[command(version)]
struct Cli {
    /// Path to the collection store
    #[arg(long, global = true, default_value = "collection.csv")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add stickers to the collection
    #[command(after_help = "\
The whole request is rejected if any id is outside 1-720; the store is
left untouched in that case.

Examples:
  album add 17
  album add 1,2,3,17
  album add 41,41 --dupes")]
    Add {
        /// Comma-separated sticker numbers
        ids: String,

        /// Count re-added stickers as duplicates (increment their count)
        #[arg(long, overrides_with = "no_dupes")]
        dupes: bool,

        /// Leave counts of re-added stickers unchanged (default)
        #[arg(long)]
        no_dupes: bool,
    },

    /// Print missing sticker numbers
    Missing,

    /// Print owned sticker numbers
    Owned,

    /// Print collection stats
    Stats,

    /// Compare with another collection for exchange opportunities
    #[command(after_help = "\
Examples:
  album compare https://example.com/theirs.csv
  album compare friend-collection.csv
  album compare friend-collection.csv --json")]
    Compare {
        /// Peer collection location (URL or local CSV path)
        peer: String,

        /// Output the full exchange report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive scan session (OCR via tesseract)
    #[command(after_help = "\
Reads single-letter commands from stdin:
  d <image>  detect sticker number in an image file
  n          accept detected number into the pending list (max 8)
  a          add the pending list to the collection
  c          clear the pending list
  q          quit")]
    Scan {
        /// Count re-added stickers as duplicates when committing
        #[arg(long)]
        dupes: bool,

        /// Tesseract executable to invoke
        #[arg(long, default_value = "tesseract")]
        tesseract: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Add { ids, dupes, no_dupes: _ } => cmd_add(&cli.store, &ids, dupes),
        Commands::Missing => cmd_missing(&cli.store),
        Commands::Owned => cmd_owned(&cli.store),
        Commands::Stats => cmd_stats(&cli.store),
        Commands::Compare { peer, json } => cmd_compare(&cli.store, &peer, json),
        Commands::Scan { dupes, tesseract } => scan::cmd_scan(&cli.store, dupes, tesseract),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

// ============================================================================
// store access
// ============================================================================

fn load_store(path: &PathBuf) -> Result<Collection, CliError> {
    let LoadReport {
        collection,
        skipped_rows,
    } = album_store::load(path).map_err(|e| CliError::store(e.to_string()))?;
    if skipped_rows > 0 {
        eprintln!("note: skipped {skipped_rows} malformed row(s) in {}", path.display());
    }
    Ok(collection)
}

fn save_store(path: &PathBuf, collection: &Collection) -> Result<(), CliError> {
    album_store::save(path, collection).map_err(|e| CliError::store(e.to_string()))
}

// ============================================================================
// add
// ============================================================================

fn cmd_add(store: &PathBuf, ids: &str, dupes: bool) -> Result<(), CliError> {
    let ids = parse_id_list(ids)?;
    let request = AddRequest::new(ids, TOTAL_STICKERS)
        .map_err(|e| CliError::validation(e.to_string()))?;

    let mut collection = load_store(store)?;
    let outcome = request.apply(&mut collection, dupes);
    save_store(store, &collection)?;

    if !outcome.added.is_empty() {
        println!("Added {} sticker(s): {}", outcome.added.len(), join_ids(&outcome.added));
    }
    if !outcome.duplicates.is_empty() {
        if dupes {
            println!(
                "Counted {} duplicate(s): {}",
                outcome.duplicates.len(),
                join_ids(&outcome.duplicates)
            );
        } else {
            println!(
                "Already owned, counts unchanged: {}",
                join_ids(&outcome.duplicates)
            );
            eprintln!("hint:  pass --dupes to count re-added stickers as duplicates");
        }
    }
    Ok(())
}

/// Parse a comma-separated id list. Unparsable tokens are a usage
/// error; range checking happens later in `AddRequest::new`.
fn parse_id_list(input: &str) -> Result<Vec<StickerId>, CliError> {
    input
        .split(',')
        .map(|token| {
            let token = token.trim();
            token.parse::<StickerId>().map_err(|_| {
                CliError::args(format!("not a sticker number: {token:?}"))
                    .with_hint("pass a comma-separated list, e.g. album add 1,2,17")
            })
        })
        .collect()
}

// ============================================================================
// missing / owned / stats
// ============================================================================

fn cmd_missing(store: &PathBuf) -> Result<(), CliError> {
    let collection = load_store(store)?;
    let missing = collection.missing_ids(TOTAL_STICKERS);
    println!("Missing stickers ({}):", missing.len());
    print_chunked(&missing);
    Ok(())
}

fn cmd_owned(store: &PathBuf) -> Result<(), CliError> {
    let collection = load_store(store)?;
    let owned: Vec<StickerId> = collection.owned_ids().collect();
    println!("Owned stickers ({}):", owned.len());
    print_chunked(&owned);
    Ok(())
}

fn cmd_stats(store: &PathBuf) -> Result<(), CliError> {
    let collection = load_store(store)?;
    let stats = collection.stats(TOTAL_STICKERS);
    println!("Collection stats:");
    println!("- Owned: {} ({:.1}%)", stats.owned, stats.progress_percent);
    println!("- Missing: {}", stats.missing);
    println!("- Total: {}", stats.total);
    println!("- Duplicates for exchange: {}", stats.duplicates);
    Ok(())
}

/// Ten ids per line, the way the printed album checklist reads.
fn print_chunked(ids: &[StickerId]) {
    for chunk in ids.chunks(10) {
        println!("{}", join_ids(chunk));
    }
}

fn join_ids(ids: &[StickerId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// compare
// ============================================================================

fn cmd_compare(store: &PathBuf, peer: &str, json: bool) -> Result<(), CliError> {
    let mine = load_store(store)?;

    let peer_data = fetch::fetch_peer(peer)?;
    let mut peer_report = album_store::parse_peer(&peer_data);
    if peer_report.skipped_rows > 0 {
        eprintln!(
            "note: skipped {} malformed row(s) in peer collection",
            peer_report.skipped_rows
        );
    }
    // Peer data is external input; drop ids outside the album.
    peer_report.collection.retain_domain(TOTAL_STICKERS);

    let report = album_recon::compare(&mine, &peer_report.collection, TOTAL_STICKERS);

    if json {
        let out = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::new(format!("JSON serialization error: {e}")))?;
        println!("{out}");
        return Ok(());
    }

    print_exchange_report(&report);
    Ok(())
}

fn print_exchange_report(report: &ExchangeReport) {
    println!("Exchange opportunities:");

    println!("\nThey can give you ({}):", report.they_can_give.len());
    for entry in &report.they_can_give {
        println!("- sticker #{} (they have {} extra)", entry.id, entry.extra);
    }

    println!("\nYou can give them ({}):", report.i_can_give.len());
    for entry in &report.i_can_give {
        println!("- sticker #{} (you have {} extra)", entry.id, entry.extra);
    }
}

// ============================================================================
// errors
// ============================================================================

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { code: exit_codes::EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self { code: EXIT_VALIDATION, message: msg.into(), hint: None }
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self { code: EXIT_STORE, message: msg.into(), hint: None }
    }

    pub fn fetch(msg: impl Into<String>) -> Self {
        Self { code: EXIT_FETCH, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
