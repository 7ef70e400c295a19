use std::fs::{File, OpenOptions};
use std::io::{self, Seek, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::source::{FollowedFile, StdinLines};
use crate::window::append::record;
use crate::window::count::count_lines;

/// Runs the tee loop described by `config` until the input ends or fails.
pub fn run(config: &Config) -> Result<()> {
    let mut out = open_output(&config.output)?;

    let cur = count_lines(&mut out)
        .with_context(|| format!("failed to scan output file: {}", config.output.display()))?;
    out.rewind()
        .with_context(|| format!("failed to rewind output file: {}", config.output.display()))?;

    tracing::info!(
        output = %config.output.display(),
        limit = config.tail_length,
        existing = cur,
        "Capping output file"
    );

    match &config.input {
        Some(path) => tee_file(&mut out, cur, config.tail_length, path),
        None => tee_stdin(&mut out, cur, config.tail_length),
    }
}

/// Opens the window file read/write, creating it with conservative
/// non-executable permissions when absent.
fn open_output(path: &Path) -> Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .mode(0o644)
        .open(path)
        .with_context(|| format!("failed to open output file: {}", path.display()))
}

/// Tees stdin into the window file, echoing each line back to stdout so the
/// tool is transparent in a pipeline. Ends at end-of-stream.
fn tee_stdin(out: &mut File, mut cur: usize, max: usize) -> Result<()> {
    let mut source = StdinLines::new();
    let mut stdout = io::stdout().lock();

    while let Some(line) = source.next_line()? {
        cur = record(out, &line, max, cur).context("failed to record line")?;
        writeln!(stdout, "{line}").context("failed to echo line to stdout")?;
    }

    Ok(())
}

/// Feeds every line appended to `path` into the window file. Runs until the
/// process is terminated or an I/O error aborts the run.
fn tee_file(out: &mut File, mut cur: usize, max: usize, path: &Path) -> Result<()> {
    let mut source = FollowedFile::open(path)?;
    tracing::info!(input = %path.display(), "Following input file");

    loop {
        let line = source.next_line()?;
        cur = record(out, &line, max, cur).context("failed to record line")?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_open_output_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");

        let file = open_output(&path).unwrap();
        assert!(path.exists());

        use std::os::unix::fs::PermissionsExt;
        let mode = file.metadata().unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0, "output file must not be executable");
    }

    #[test]
    fn test_open_output_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        std::fs::write(&path, "kept\n").unwrap();

        let mut file = open_output(&path).unwrap();
        let mut text = String::new();
        file.read_to_string(&mut text).unwrap();
        assert_eq!(text, "kept\n");
    }
}
