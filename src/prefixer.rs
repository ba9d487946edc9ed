// src/prefixer.rs

//! Line splitting + timestamp prefixing.
//!
//! Each newline-terminated line of input becomes `<timestamp> <line>\n` on
//! the output. A trailing `\r` before the newline is dropped (pty output
//! uses CRLF). Lines are unbounded in length: the reader grows its buffer as
//! needed instead of truncating.

use std::io::{self, BufRead, Write};

use tracing::{debug, trace};

use crate::timestamp::TimestampSource;

/// Copy `reader` to `writer`, prefixing every line with a timestamp.
///
/// The timestamp source is asked exactly once per emitted line, in input
/// order, when the line is complete. A final line without a terminator is
/// still emitted once the input ends. Output is flushed after every line so
/// lines show up as they arrive.
///
/// Returns the number of lines written.
pub fn prefix_lines<R, W, T>(mut reader: R, mut writer: W, timestamps: &mut T) -> io::Result<u64>
where
    R: BufRead,
    W: Write,
    T: TimestampSource + ?Sized,
{
    let mut buf = Vec::new();
    let mut count = 0u64;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let stamp = timestamps.current_timestamp_string();
        write_prefixed(&mut writer, &stamp, strip_line_ending(&buf))?;
        count += 1;
        trace!(line = count, bytes = buf.len(), "prefixed line");
    }

    debug!(lines = count, "input stream ended");
    Ok(count)
}

fn write_prefixed<W: Write>(writer: &mut W, stamp: &str, line: &[u8]) -> io::Result<()> {
    writer.write_all(stamp.as_bytes())?;
    writer.write_all(b" ")?;
    writer.write_all(line)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
