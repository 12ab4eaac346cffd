//! Document title extraction.
//!
//! A document's title is the text of its first level-1 ATX heading, matched
//! on the raw source lines rather than on the parsed document: the line must
//! start with exactly `"# "`. Indented headings, `#Title`, a bare `#` and
//! deeper levels such as `## Title` never qualify.

use std::{fs, io, path::Path};

/// Prefix a line must start with to count as a level-1 heading.
pub const TITLE_PREFIX: &str = "# ";

/// Error returned when a document has no level-1 heading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TitleError {
  #[error("heading 1 not found")]
  NotFound,
}

/// Return the text following `"# "` on the first line that starts with it.
///
/// The remainder of the line is returned as is; only the line terminator
/// (`\n` or `\r\n`) is stripped.
///
/// # Errors
///
/// Returns [`TitleError::NotFound`] when no line qualifies.
pub fn extract_title(content: &str) -> Result<String, TitleError> {
  first_heading(content).ok_or(TitleError::NotFound)
}

/// [`extract_title`] as an [`Option`].
#[must_use]
pub fn first_heading(content: &str) -> Option<String> {
  content
    .lines()
    .find_map(|line| line.strip_prefix(TITLE_PREFIX))
    .map(str::to_string)
}

/// Read a file and extract its title.
///
/// # Errors
///
/// Returns any I/O error raised while reading the file. A missing heading is
/// not an error and yields `Ok(None)`. Invalid UTF-8 is replaced with
/// U+FFFD.
pub fn extract_title_from_file(path: &Path) -> io::Result<Option<String>> {
  let bytes = fs::read(path)?;
  Ok(first_heading(&String::from_utf8_lossy(&bytes)))
}
