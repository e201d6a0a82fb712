//! `album scan` — interactive capture session.
//!
//! Line-oriented stdin protocol: `d` detects, `n` accepts, `a`
//! commits, `c` clears, `q` quits. Frames are image files named on the
//! `d` command, which keeps the session headless while driving the
//! full state machine and recognizer seam.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use album_capture::{
    AcceptRejection, CommitOutcome, DetectionState, Recognizer, TesseractRecognizer,
    PENDING_CAPACITY,
};
use album_core::{AddRequest, TOTAL_STICKERS};

use crate::{join_ids, load_store, save_store, CliError};

pub fn cmd_scan(store: &PathBuf, dupes: bool, tesseract: PathBuf) -> Result<(), CliError> {
    let recognizer = TesseractRecognizer::with_command(tesseract, TOTAL_STICKERS);
    let stdin = io::stdin();
    run_session(store, dupes, &recognizer, stdin.lock())
}

fn run_session<R: Recognizer>(
    store: &PathBuf,
    dupes: bool,
    recognizer: &R,
    input: impl BufRead,
) -> Result<(), CliError> {
    println!("Sticker scanner started. Commands:");
    println!("  d <image>  detect sticker number");
    println!("  n          accept detected number (max {PENDING_CAPACITY})");
    println!("  a          add pending numbers to collection");
    println!("  c          clear pending list");
    println!("  q          quit");

    let mut state = DetectionState::new();

    for line in input.lines() {
        let line = line.map_err(|e| CliError::new(format!("cannot read input: {e}")))?;
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("d") => match parts.next() {
                Some(path) => handle_detect(&mut state, recognizer, Path::new(path)),
                None => println!("usage: d <image>"),
            },
            Some("n") => handle_accept(&mut state),
            Some("a") => handle_commit(&mut state, store, dupes),
            Some("c") => {
                state.clear();
                println!("Cleared pending list.");
            }
            Some("q") => break,
            Some(other) => println!("unknown command: {other}"),
            None => {}
        }
    }
    Ok(())
}

fn handle_detect<R: Recognizer>(state: &mut DetectionState, recognizer: &R, path: &Path) {
    let frame = match image::open(path) {
        Ok(img) => img.to_luma8(),
        Err(e) => {
            println!("cannot open {}: {e}", path.display());
            return;
        }
    };
    match state.detect(recognizer, &frame) {
        Some(id) => println!("Detected sticker number: {id}"),
        None => println!("No number detected. Try adjusting lighting or position."),
    }
}

fn handle_accept(state: &mut DetectionState) {
    match state.accept() {
        Ok(id) => println!(
            "Added {id} to pending list ({}/{PENDING_CAPACITY}).",
            state.pending().len()
        ),
        Err(AcceptRejection::NothingDetected) => {
            println!("No number detected to accept. Use 'd' first.")
        }
        Err(AcceptRejection::DuplicateInPending) => {
            println!("Number already in pending list.")
        }
        Err(AcceptRejection::ListFull) => {
            println!("Pending list is full. Use 'a' to add or 'c' to clear.")
        }
    }
}

fn handle_commit(state: &mut DetectionState, store: &PathBuf, dupes: bool) {
    let outcome: Result<CommitOutcome, CliError> = state.commit(|ids| {
        let request =
            AddRequest::new(ids.to_vec(), TOTAL_STICKERS).map_err(|e| CliError::validation(e.to_string()))?;
        let mut collection = load_store(store)?;
        let applied = request.apply(&mut collection, dupes);
        save_store(store, &collection)?;
        if !applied.duplicates.is_empty() {
            let verb = if dupes { "counted" } else { "skipped" };
            println!("Duplicates {verb}: {}", join_ids(&applied.duplicates));
        }
        Ok(())
    });
    match outcome {
        Ok(CommitOutcome::Committed(n)) => println!("Added {n} number(s) to collection."),
        Ok(CommitOutcome::NothingPending) => println!("No pending numbers to add."),
        // Pending list is kept so the user can fix the problem and retry.
        Err(e) => println!("Failed to add numbers: {}", e.message),
    }
}
