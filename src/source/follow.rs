use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};

use anyhow::{bail, Context, Result};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};

/// Follows a file for newly appended lines, like `tail -f`.
///
/// Existing content is yielded first, oldest line first; after that each
/// call blocks on the watcher until more data arrives. A file that shrinks
/// under us is treated as truncated and reading restarts from the top. The
/// follower keeps the descriptor it opened, so a rename-and-recreate of the
/// path is not picked up.
#[derive(Debug)]
pub struct FollowedFile {
    path: PathBuf,
    reader: BufReader<File>,
    /// Bytes consumed so far, for truncation detection
    pos: u64,
    /// Unterminated tail of the file, held until its newline arrives
    partial: String,
    events: Receiver<notify::Result<notify::Event>>,
    _watcher: RecommendedWatcher,
}

impl FollowedFile {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("no such input file: {}", path.display());
        }

        let file = File::open(path)
            .with_context(|| format!("failed to open input file: {}", path.display()))?;

        let (tx, rx) = channel();
        let mut watcher = notify::recommended_watcher(tx).context("failed to create file watcher")?;
        watcher
            .watch(path, RecursiveMode::NonRecursive)
            .with_context(|| format!("failed to watch input file: {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            pos: 0,
            partial: String::new(),
            events: rx,
            _watcher: watcher,
        })
    }

    /// Blocks until the next complete line is available. The stream never
    /// ends on its own; only a watcher or read failure breaks the loop.
    pub fn next_line(&mut self) -> Result<String> {
        loop {
            let mut buf = String::new();
            let n = self
                .reader
                .read_line(&mut buf)
                .with_context(|| format!("failed to read input file: {}", self.path.display()))?;

            if n == 0 {
                self.wait_for_change()?;
                continue;
            }

            self.pos += n as u64;
            if buf.ends_with('\n') {
                buf.pop();
                if buf.ends_with('\r') {
                    buf.pop();
                }
                let mut line = std::mem::take(&mut self.partial);
                line.push_str(&buf);
                return Ok(line);
            }

            // Writer stopped mid-line; hold the prefix until the rest lands
            self.partial.push_str(&buf);
        }
    }

    fn wait_for_change(&mut self) -> Result<()> {
        match self.events.recv() {
            Ok(Ok(_event)) => {
                let len = self
                    .reader
                    .get_ref()
                    .metadata()
                    .with_context(|| format!("failed to stat input file: {}", self.path.display()))?
                    .len();
                if len < self.pos {
                    // Truncated under us; restart from the top
                    tracing::debug!(input = %self.path.display(), "Input file truncated, rewinding");
                    self.reader.seek(SeekFrom::Start(0)).with_context(|| {
                        format!("failed to rewind input file: {}", self.path.display())
                    })?;
                    self.pos = 0;
                    self.partial.clear();
                }
                Ok(())
            }
            Ok(Err(e)) => Err(e).context("file watcher error"),
            Err(_) => bail!("file watcher stopped: {}", self.path.display()),
        }
    }
}
