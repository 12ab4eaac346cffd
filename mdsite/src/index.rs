//! Per-directory index listings.
//!
//! Every directory gets an `index.html` holding a bare `<ul>` that links to
//! the pages rendered from its direct Markdown children, most recently
//! modified first. Documents without a level-1 heading have no title to show
//! and are left out of the listing; their pages are still rendered.

use std::{
  cmp::Reverse,
  fs,
  path::Path,
  time::SystemTime,
};

use html_escape::{encode_double_quoted_attribute, encode_text};
use log::debug;
use mdsite_commonmark::extract_title_from_file;

use crate::{error::SiteError, paths};

/// A Markdown document found directly inside an indexed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
  /// File name of the document, e.g. `notes.md`.
  pub file_name: String,
  /// Last modification time of the document.
  pub modified:  SystemTime,
  /// Text of the first `# ` heading, if any.
  pub title:     Option<String>,
}

/// A single link of an index listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexLink {
  pub href:  String,
  pub title: String,
}

/// Ordered links for one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexListing {
  links: Vec<IndexLink>,
}

impl IndexListing {
  /// Rank `entries` and turn the titled ones into links.
  ///
  /// Entries are ordered by modification time, newest first. Entries with
  /// the same modification time are ordered by file name so the listing does
  /// not depend on directory enumeration order.
  #[must_use]
  pub fn from_entries(mut entries: Vec<IndexEntry>) -> Self {
    entries.sort_by(|a, b| {
      Reverse(a.modified)
        .cmp(&Reverse(b.modified))
        .then_with(|| a.file_name.cmp(&b.file_name))
    });

    let links = entries
      .into_iter()
      .filter_map(|entry| {
        let Some(title) = entry.title else {
          debug!("No title in {}, leaving it out of the index", entry.file_name);
          return None;
        };
        Some(IndexLink {
          href: paths::html_file_name(&entry.file_name),
          title,
        })
      })
      .collect();

    Self { links }
  }

  #[must_use]
  pub fn links(&self) -> &[IndexLink] {
    &self.links
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.links.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.links.is_empty()
  }

  /// Serialize as `<ul><li><a href="...">title</a></li>...</ul>`.
  ///
  /// An empty listing still yields `<ul></ul>`.
  #[must_use]
  pub fn to_html(&self) -> String {
    let items: String = self
      .links
      .iter()
      .map(|link| {
        format!(
          "<li><a href=\"{}\">{}</a></li>",
          encode_double_quoted_attribute(&link.href),
          encode_text(&link.title)
        )
      })
      .collect();
    format!("<ul>{items}</ul>")
  }
}

/// Collect the Markdown documents directly inside `dir`.
///
/// Subdirectories are not descended into.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed, or a document's
/// metadata or content cannot be read.
pub fn collect_entries(dir: &Path) -> Result<Vec<IndexEntry>, SiteError> {
  let mut entries = Vec::new();

  for dir_entry in fs::read_dir(dir).map_err(SiteError::io(dir))? {
    let dir_entry = dir_entry.map_err(SiteError::io(dir))?;
    let path = dir_entry.path();
    let file_type = dir_entry.file_type().map_err(SiteError::io(&path))?;
    if file_type.is_dir() || !paths::is_markdown(&path) {
      continue;
    }

    let modified = dir_entry
      .metadata()
      .and_then(|metadata| metadata.modified())
      .map_err(SiteError::io(&path))?;
    let title = extract_title_from_file(&path).map_err(SiteError::io(&path))?;

    entries.push(IndexEntry {
      file_name: dir_entry.file_name().to_string_lossy().into_owned(),
      modified,
      title,
    });
  }

  Ok(entries)
}

/// Build the listing for `dir`.
///
/// # Errors
///
/// See [`collect_entries`].
pub fn build_index(dir: &Path) -> Result<IndexListing, SiteError> {
  collect_entries(dir).map(IndexListing::from_entries)
}

/// Build the listing for `dir` and write it to `output_dir/index.html`,
/// creating `output_dir` if needed.
///
/// # Errors
///
/// Returns an error if the listing cannot be built or the file cannot be
/// written.
pub fn write_index(
  dir: &Path,
  output_dir: &Path,
) -> Result<IndexListing, SiteError> {
  let listing = build_index(dir)?;

  fs::create_dir_all(output_dir).map_err(SiteError::io(output_dir))?;
  let index_path = output_dir.join(paths::INDEX_FILE);
  fs::write(&index_path, listing.to_html())
    .map_err(SiteError::io(&index_path))?;

  debug!(
    "Wrote {} with {} link(s)",
    index_path.display(),
    listing.len()
  );
  Ok(listing)
}
