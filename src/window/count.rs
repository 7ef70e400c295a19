use std::io::{ErrorKind, Read};

use thiserror::Error;

/// Scan buffer size; keeps memory bounded no matter how large the file is.
const SCAN_CHUNK: usize = 32 * 1024;

/// Read failure during the startup line scan.
///
/// Carries the count accumulated before the failing read so the caller can
/// decide what to do with the partial result.
#[derive(Debug, Error)]
#[error("line scan failed after {partial} lines")]
pub struct ScanError {
    pub partial: usize,
    #[source]
    pub source: std::io::Error,
}

/// Counts newline bytes in `reader` up to end-of-stream.
///
/// Leaves the read position at end-of-stream; callers must not assume any
/// position afterwards.
pub fn count_lines<R: Read>(reader: &mut R) -> Result<usize, ScanError> {
    let mut buf = [0u8; SCAN_CHUNK];
    let mut count = 0;

    loop {
        match reader.read(&mut buf) {
            Ok(0) => return Ok(count),
            Ok(n) => count += buf[..n].iter().filter(|&&b| b == b'\n').count(),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(ScanError {
                    partial: count,
                    source: e,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_empty_input() {
        assert_eq!(count_lines(&mut Cursor::new("")).unwrap(), 0);
    }

    #[test]
    fn test_counts_terminated_lines() {
        assert_eq!(count_lines(&mut Cursor::new("a\nb\nc\n")).unwrap(), 3);
    }

    #[test]
    fn test_unterminated_tail_not_counted() {
        assert_eq!(count_lines(&mut Cursor::new("a\nb\nc")).unwrap(), 2);
    }

    #[test]
    fn test_counts_across_chunk_boundary() {
        let content = "x\n".repeat(40_000);
        assert_eq!(count_lines(&mut Cursor::new(content)).unwrap(), 40_000);
    }

    #[test]
    fn test_partial_count_on_read_error() {
        struct FailAfter {
            data: Cursor<&'static [u8]>,
            failed: bool,
        }

        impl Read for FailAfter {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                match self.data.read(buf)? {
                    0 if !self.failed => {
                        self.failed = true;
                        Err(std::io::Error::other("disk gone"))
                    }
                    n => Ok(n),
                }
            }
        }

        let mut reader = FailAfter {
            data: Cursor::new(&b"a\nb\n"[..]),
            failed: false,
        };
        let err = count_lines(&mut reader).unwrap_err();
        assert_eq!(err.partial, 2);
    }
}
