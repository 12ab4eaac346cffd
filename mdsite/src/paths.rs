//! Destination path derivation.
//!
//! Output paths are a pure function of source paths: a document at
//! `source/rel/name.md` becomes `destination/rel/name.html`, a directory at
//! `source/rel` gets `destination/rel/index.html`.

use std::path::{Path, PathBuf};

use crate::error::SiteError;

/// Extension of documents that get rendered. Matched case-sensitively.
pub const MARKDOWN_EXTENSION: &str = "md";
pub const HTML_EXTENSION: &str = "html";
pub const INDEX_FILE: &str = "index.html";

/// A document whose whole name is the extension. [`Path::extension`] sees no
/// extension here, but it is still rendered, to `.html`.
const BARE_MARKDOWN_NAME: &str = ".md";
const BARE_HTML_NAME: &str = ".html";

/// Whether `path` names a Markdown document (`.md`, exact case).
#[must_use]
pub fn is_markdown(path: &Path) -> bool {
  path.extension().is_some_and(|ext| ext == MARKDOWN_EXTENSION)
    || path.file_name().is_some_and(|name| name == BARE_MARKDOWN_NAME)
}

/// Replace the `.md` extension of `path` with `.html`.
fn with_html_extension(path: &Path) -> PathBuf {
  if path.file_name().is_some_and(|name| name == BARE_MARKDOWN_NAME) {
    path.with_file_name(BARE_HTML_NAME)
  } else {
    path.with_extension(HTML_EXTENSION)
  }
}

/// File name a document is rendered to, e.g. `notes.md` -> `notes.html`.
#[must_use]
pub fn html_file_name(file_name: &str) -> String {
  with_html_extension(Path::new(file_name))
    .to_string_lossy()
    .into_owned()
}

/// `path` relative to `root`.
///
/// # Errors
///
/// Returns an error if `path` does not live under `root`.
pub fn relative_path(root: &Path, path: &Path) -> Result<PathBuf, SiteError> {
  path
    .strip_prefix(root)
    .map(Path::to_path_buf)
    .map_err(|_| {
      SiteError::Config(format!(
        "{} is not inside {}",
        path.display(),
        root.display()
      ))
    })
}

/// Destination of the page rendered from the document at `rel`.
#[must_use]
pub fn page_output_path(destination: &Path, rel: &Path) -> PathBuf {
  with_html_extension(&destination.join(rel))
}

/// Destination of the index generated for the directory at `rel_dir`.
#[must_use]
pub fn index_output_path(destination: &Path, rel_dir: &Path) -> PathBuf {
  destination.join(rel_dir).join(INDEX_FILE)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_is_markdown_is_case_sensitive() {
    assert!(is_markdown(Path::new("docs/a.md")));
    assert!(!is_markdown(Path::new("docs/a.MD")));
    assert!(!is_markdown(Path::new("docs/a.markdown")));
    assert!(!is_markdown(Path::new("docs/md")));
    assert!(!is_markdown(Path::new("docs/a.md.bak")));
    assert!(!is_markdown(Path::new("docs/.MD")));
  }

  #[test]
  fn test_bare_extension_name_is_markdown() {
    assert!(is_markdown(Path::new("docs/.md")));
    assert_eq!(html_file_name(".md"), ".html");
    assert_eq!(
      page_output_path(Path::new("out"), Path::new("docs/.md")),
      PathBuf::from("out/docs/.html")
    );
  }

  #[test]
  fn test_html_file_name() {
    assert_eq!(html_file_name("notes.md"), "notes.html");
    assert_eq!(html_file_name("v1.2.md"), "v1.2.html");
  }

  #[test]
  fn test_output_paths_mirror_source() {
    let out = Path::new("out");
    assert_eq!(
      page_output_path(out, Path::new("docs/notes.md")),
      PathBuf::from("out/docs/notes.html")
    );
    assert_eq!(
      index_output_path(out, Path::new("docs")),
      PathBuf::from("out/docs/index.html")
    );
    assert_eq!(
      index_output_path(out, Path::new("")),
      PathBuf::from("out/index.html")
    );
  }

  #[test]
  fn test_relative_path() {
    let rel = relative_path(Path::new("src"), Path::new("src/docs/a.md"))
      .expect("path is under root");
    assert_eq!(rel, PathBuf::from("docs/a.md"));
    assert!(relative_path(Path::new("src"), Path::new("other/a.md")).is_err());
  }
}
