use std::{
  io,
  path::{Path, PathBuf},
};

use mdsite_commonmark::ProcessError;
use thiserror::Error;

/// Top-level error type for the mdsite crate.
///
/// Every variant is fatal for a build: the first one raised stops the build
/// and is returned to the caller.
#[derive(Debug, Error)]
pub enum SiteError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("I/O error on {}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to walk source tree")]
  Walk(#[from] walkdir::Error),

  #[error("Failed to render {}", path.display())]
  Render {
    path:   PathBuf,
    #[source]
    source: ProcessError,
  },

  #[error("Markdown processor error: {0}")]
  Processor(#[from] ProcessError),

  #[error("Failed to start worker pool: {0}")]
  ThreadPool(#[from] rayon::ThreadPoolBuildError),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("TOML error: {0}")]
  Toml(#[from] toml::de::Error),
}

impl SiteError {
  /// Adapter for `map_err` that attaches the path an I/O error relates to.
  pub fn io(path: impl AsRef<Path>) -> impl FnOnce(io::Error) -> Self {
    let path = path.as_ref().to_path_buf();
    move |source| Self::Io { path, source }
  }

  /// Adapter for `map_err` that attaches the document a render error
  /// relates to.
  pub fn render(path: impl AsRef<Path>) -> impl FnOnce(ProcessError) -> Self {
    let path = path.as_ref().to_path_buf();
    move |source| Self::Render { path, source }
  }
}
