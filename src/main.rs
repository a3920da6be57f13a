//! Main entry point for the rusty-history recorder.
//!
//! Reads lines from stdin the way a shell front end receives them, records
//! each one, and merges the session's history into the history file on exit.
//!
//! Commands understood besides ordinary input:
//! - `:history` prints the recorded history, most recent first
//! - `:quit` ends the session (so does end of input)

use std::io::{self, BufRead, Write};

use anyhow::Result;

use rusty_history::config::HistoryConfig;
use rusty_history::session::{Recorder, SessionHost};
use rusty_history::utils;

fn main() -> Result<()> {
    // Initialize logging before anything else
    let _log_guard = utils::logger::init_logging();

    let config = HistoryConfig::load_or_default()?;
    let mut host = SessionHost::new();
    let mut recorder = Recorder::new(&config)?;
    recorder.activate(&mut host)?;

    let process = Some(std::process::id());
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            ":quit" => break,
            ":history" => {
                for (i, entry) in recorder.search().iter().enumerate() {
                    writeln!(stdout, "{:>5}  {}", i, entry)?;
                }
                stdout.flush()?;
            }
            _ => {
                if let Err(e) = host.submit(process, &line) {
                    tracing::error!("Failed to record command: {:#}", e);
                }
            }
        }
    }

    host.shutdown()?;
    recorder.deactivate(&mut host);
    Ok(())
}
