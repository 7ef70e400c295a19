use std::path::PathBuf;

use anyhow::{bail, Result};

/// Runtime configuration, resolved once at startup and passed by reference
/// into the tee loop. No global state.
#[derive(Debug, Clone)]
pub struct Config {
    /// File to follow for new lines; `None` reads standard input
    pub input: Option<PathBuf>,
    /// File holding the capped window of lines
    pub output: PathBuf,
    /// Maximum number of lines retained in the output file
    pub tail_length: usize,
}

impl Config {
    /// Validates the degenerate cases up front, before any file I/O.
    pub fn new(input: Option<PathBuf>, output: PathBuf, tail_length: usize) -> Result<Self> {
        if output.as_os_str().is_empty() {
            bail!("output file not specified");
        }
        if tail_length == 0 {
            bail!("line limit must be at least 1");
        }
        if let Some(path) = &input {
            if !path.exists() {
                bail!("no such input file: {}", path.display());
            }
        }

        Ok(Self {
            input,
            output,
            tail_length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_minimal_config() {
        let config = Config::new(None, PathBuf::from("out.log"), 10).unwrap();
        assert!(config.input.is_none());
        assert_eq!(config.tail_length, 10);
    }

    #[test]
    fn test_rejects_empty_output() {
        assert!(Config::new(None, PathBuf::new(), 10).is_err());
    }

    #[test]
    fn test_rejects_zero_line_limit() {
        assert!(Config::new(None, PathBuf::from("out.log"), 0).is_err());
    }

    #[test]
    fn test_rejects_missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("absent.log");
        let err = Config::new(Some(absent), PathBuf::from("out.log"), 10).unwrap_err();
        assert!(err.to_string().contains("no such input file"));
    }

    #[test]
    fn test_accepts_existing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.log");
        std::fs::write(&input, "x\n").unwrap();
        assert!(Config::new(Some(input), PathBuf::from("out.log"), 10).is_ok());
    }
}
