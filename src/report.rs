// Progress notification and formatted console output.
//
// The core never prints; it talks to a `Reporter`. The console
// implementation renders the same report the tool has always produced:
// a per-position "all players" listing followed by the selection grouped
// by position, one `- Name (P%)` bullet per player.

use std::io::Write;

use crate::pool::{Candidate, Pool, Position};

pub trait Reporter {
    /// Called once per input name, after that name finished processing.
    fn progress(&mut self, done: usize, total: usize, query: &str);

    /// Render the per-position "all players" view.
    fn all_players(&mut self, heading: &str, pool: &Pool);

    /// Render a selection (assembled lineup or ranked market shortlist)
    /// grouped by position.
    fn selection(&mut self, heading: &str, players: &[Candidate]);
}

// ---------------------------------------------------------------------------
// Console implementation
// ---------------------------------------------------------------------------

/// Writes to stdout. Progress is a single rewritten line, so the log file
/// (not the console) carries the per-player diagnostics.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn progress(&mut self, done: usize, total: usize, query: &str) {
        print!("\rProcessing {done}/{total} ({query})\u{1b}[K");
        let _ = std::io::stdout().flush();
        if done == total {
            println!();
        }
    }

    fn all_players(&mut self, heading: &str, pool: &Pool) {
        println!("{heading}:");
        for position in Position::ALL {
            println!("{}:", position.label());
            for candidate in pool.position(position) {
                println!("- {} ({}%)", candidate.name, candidate.probability);
            }
        }
    }

    fn selection(&mut self, heading: &str, players: &[Candidate]) {
        println!("{heading}:");
        for position in Position::ALL {
            println!("{}:", position.plural());
            for candidate in players.iter().filter(|c| c.position == position) {
                println!("- {} ({}%)", candidate.name, candidate.probability);
            }
        }
    }
}

/// Discards everything. Used by tests and benchmarks.
pub struct NullReporter;

impl Reporter for NullReporter {
    fn progress(&mut self, _done: usize, _total: usize, _query: &str) {}
    fn all_players(&mut self, _heading: &str, _pool: &Pool) {}
    fn selection(&mut self, _heading: &str, _players: &[Candidate]) {}
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Captures reporter calls for assertions.
    pub(crate) struct RecordingReporter {
        pub progress_calls: Vec<(usize, usize, String)>,
    }

    impl RecordingReporter {
        pub(crate) fn new() -> Self {
            Self {
                progress_calls: Vec::new(),
            }
        }
    }

    impl Reporter for RecordingReporter {
        fn progress(&mut self, done: usize, total: usize, query: &str) {
            self.progress_calls.push((done, total, query.to_string()));
        }
        fn all_players(&mut self, _heading: &str, _pool: &Pool) {}
        fn selection(&mut self, _heading: &str, _players: &[Candidate]) {}
    }

    #[test]
    fn recording_reporter_counts_calls() {
        let mut reporter = RecordingReporter::new();
        reporter.progress(1, 2, "a");
        reporter.progress(2, 2, "b");
        assert_eq!(reporter.progress_calls.len(), 2);
        assert_eq!(reporter.progress_calls[1], (2, 2, "b".to_string()));
    }
}
