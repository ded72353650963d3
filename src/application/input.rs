//! Path list parser
//!
//! Turns a newline-delimited stream into the ordered list of paths to watch.
//! The cap is hard: once `max_targets` lines are accepted the rest of the
//! stream is left unread. No validation happens here, a blank line is a
//! (degenerate) path and is rejected later by the registrar.

use std::io::BufRead;

use crate::error::WatchrunResult;

/// Read at most `max_targets` paths, one per line.
///
/// The line terminator (`\n` or `\r\n`) is stripped; a final line without a
/// terminator is still accepted. Only an I/O error from the stream itself can
/// make this fail.
///
/// Paths are carried as UTF-8 strings. Bytes that are not valid UTF-8 are
/// replaced with U+FFFD, so a file whose name is not UTF-8 cannot be watched:
/// the mangled name does not exist and registration reports it as not found.
pub fn read_path_list<R: BufRead>(mut reader: R, max_targets: usize) -> WatchrunResult<Vec<String>> {
    let mut paths = Vec::new();
    let mut line = Vec::new();

    while paths.len() < max_targets {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }
        paths.push(String::from_utf8_lossy(&line).into_owned());
    }

    Ok(paths)
}
