use crate::error::{CheckError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Returns the text of the 1-based line `target` in `path`.
///
/// The line terminator (`\n` or `\r\n`) is removed; nothing else is trimmed.
/// The file is opened for this call only.
///
/// # Errors
///
/// - [`CheckError::ReadSource`] if the file cannot be opened or read.
/// - [`CheckError::LineOutOfRange`] if the file has fewer than `target` lines.
pub fn read_specific_line(path: &Path, target: usize) -> Result<String> {
    let io_err = |source: std::io::Error| CheckError::ReadSource {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = BufReader::new(File::open(path).map_err(io_err)?);
    let mut buf = Vec::new();
    let mut current = 1;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).map_err(io_err)? == 0 {
            break;
        }

        if current == target {
            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }
            return Ok(String::from_utf8_lossy(&buf).into_owned());
        }

        current += 1;
    }

    Err(CheckError::LineOutOfRange { line: target })
}
