use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};

/// Records one line into the output file, evicting the oldest lines first
/// so the file never holds more than `max` lines afterwards.
///
/// `cur` is the caller-tracked line count; the updated count is returned
/// rather than stored, so the window state lives entirely with the caller.
/// Any I/O error propagates immediately and is fatal for the run.
pub fn record(out: &mut File, line: &str, max: usize, cur: usize) -> io::Result<usize> {
    let mut cur = cur;

    // Evict enough from the front that the append below stays within max
    let overflow = (cur + 1).saturating_sub(max);
    if overflow > 0 {
        let removed = pop_lines(out, overflow)?;
        tracing::debug!(requested = overflow, removed, "Evicted oldest lines");
        // Lines missing from a malformed file count as already evicted
        cur = cur.saturating_sub(overflow);
    }

    append_line(out, line)?;
    Ok(cur + 1)
}

/// Appends `line` plus a newline terminator at end-of-file. Seeks first so
/// the write lands at the end even if something else moved the cursor.
fn append_line(out: &mut File, line: &str) -> io::Result<()> {
    out.seek(SeekFrom::End(0))?;
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")
}

/// Drops the oldest `n` terminated lines from the front of the file and
/// returns how many were actually removed.
///
/// The whole file is rewritten: read everything, skip the evicted prefix,
/// write the rest back from offset zero, truncate, sync, rewind. The single
/// allocation is bounded because the file is capped at the configured line
/// limit; a design for very large limits would need a different layout.
fn pop_lines(out: &mut File, n: usize) -> io::Result<usize> {
    let len = out.metadata()?.len();
    let mut buf = Vec::with_capacity(len as usize);
    out.seek(SeekFrom::Start(0))?;
    out.read_to_end(&mut buf)?;

    let mut removed = 0;
    let mut offset = 0;
    while removed < n {
        match buf[offset..].iter().position(|&b| b == b'\n') {
            Some(i) => {
                offset += i + 1;
                removed += 1;
            }
            // Fewer terminated lines than requested; an unterminated tail
            // stays in place
            None => break,
        }
    }

    // Content must be correct before the length is fixed and flushed
    let rest = &buf[offset..];
    out.seek(SeekFrom::Start(0))?;
    out.write_all(rest)?;
    out.set_len(rest.len() as u64)?;
    out.sync_all()?;
    out.seek(SeekFrom::Start(0))?;

    Ok(removed)
}
