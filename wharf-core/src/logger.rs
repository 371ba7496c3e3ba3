use crate::{Params, Result, printable_query, truncate_long};
use std::time::Instant;

/// Tracks one statement from submission to completion for the logs.
#[derive(Debug)]
pub struct QueryLog {
    text: String,
    started: Instant,
    verbose: bool,
}

impl QueryLog {
    /// Logs the statement with its parameters, `verbose` also prints the line broken layout
    /// once the statement completes.
    pub fn start(text: &str, params: &Params, verbose: bool) -> Self {
        log::debug!("Executing: {} {:?}", truncate_long!(text), params);
        Self {
            text: if verbose { text.to_string() } else { String::new() },
            started: Instant::now(),
            verbose,
        }
    }

    /// Passes the outcome of the statement through.
    pub fn finish<T>(self, result: Result<T>) -> Result<T> {
        if self.verbose {
            log::debug!(
                "\n{}\n-- {} in {:?}",
                printable_query(&self.text),
                if result.is_ok() { "completed" } else { "failed" },
                self.started.elapsed()
            );
        }
        result
    }
}
