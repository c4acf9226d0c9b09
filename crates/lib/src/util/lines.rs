use std::fs;
use std::io;
use std::path::Path;

/// Count lines in a byte buffer.
///
/// A line is a run of bytes terminated by `\n`. A trailing run without a
/// terminator counts as one more line. `\r\n` endings count once.
pub fn count_lines(bytes: &[u8]) -> u64 {
  let newlines = bytes.iter().filter(|&&b| b == b'\n').count() as u64;
  match bytes.last() {
    Some(b'\n') | None => newlines,
    Some(_) => newlines + 1,
  }
}

/// Count lines in a file, reading it as raw bytes so encoding never matters.
pub fn count_file_lines(path: &Path) -> io::Result<u64> {
  let bytes = fs::read(path)?;
  Ok(count_lines(&bytes))
}
