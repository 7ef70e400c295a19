use std::io::{self, BufRead, Lines, StdinLock};

use anyhow::{Context, Result};

/// Line source over standard input. Terminators are stripped by the reader.
pub struct StdinLines {
    lines: Lines<StdinLock<'static>>,
}

impl StdinLines {
    pub fn new() -> Self {
        Self {
            lines: io::stdin().lock().lines(),
        }
    }

    /// Next line, or `None` once stdin reaches end-of-stream.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        self.lines
            .next()
            .transpose()
            .context("failed to read from stdin")
    }
}
