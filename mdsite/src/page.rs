//! Rendering Markdown documents to standalone HTML pages.

use std::{
  fs,
  path::{Path, PathBuf},
};

use log::debug;
use mdsite_commonmark::{MarkdownProcessor, ProcessResult};
use mdsite_templates::Stylesheet;

use crate::{config::Config, error::SiteError};

/// A complete HTML document and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
  pub path: PathBuf,
  pub html: String,
}

impl RenderedPage {
  /// Write the page, creating parent directories as needed.
  ///
  /// # Errors
  ///
  /// Returns an error if a directory cannot be created or the file cannot be
  /// written.
  pub fn write(&self) -> Result<(), SiteError> {
    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent).map_err(SiteError::io(parent))?;
    }
    fs::write(&self.path, &self.html).map_err(SiteError::io(&self.path))?;
    debug!("Wrote {}", self.path.display());
    Ok(())
  }
}

/// Turns Markdown documents into pages.
///
/// Holds the processor and the stylesheet for a whole build, so every page
/// of a build embeds the same styles.
#[derive(Debug, Clone)]
pub struct PageRenderer {
  processor:  MarkdownProcessor,
  stylesheet: Stylesheet,
}

impl PageRenderer {
  #[must_use]
  pub const fn new(processor: MarkdownProcessor, stylesheet: Stylesheet) -> Self {
    Self {
      processor,
      stylesheet,
    }
  }

  /// Create a renderer from the build configuration.
  ///
  /// # Errors
  ///
  /// Returns an error if the configured highlight theme is unknown or the
  /// custom stylesheet cannot be read.
  pub fn from_config(config: &Config) -> Result<Self, SiteError> {
    let processor = MarkdownProcessor::new(config.markdown_options())?;
    let stylesheet = config.load_stylesheet()?;
    Ok(Self::new(processor, stylesheet))
  }

  /// Render Markdown text to a complete HTML document.
  ///
  /// # Errors
  ///
  /// Returns an error if the Markdown processor fails.
  pub fn render_document(&self, markdown: &str) -> ProcessResult<String> {
    let body = self.processor.render(markdown)?;
    Ok(self.stylesheet.wrap_page(&body))
  }

  /// Read the document at `source` and render it into a page destined for
  /// `output`.
  ///
  /// # Errors
  ///
  /// Returns an error if the document cannot be read or rendered.
  pub fn render_page(
    &self,
    source: &Path,
    output: &Path,
  ) -> Result<RenderedPage, SiteError> {
    let bytes = fs::read(source).map_err(SiteError::io(source))?;
    let markdown = String::from_utf8_lossy(&bytes);
    let html = self
      .render_document(&markdown)
      .map_err(SiteError::render(source))?;

    Ok(RenderedPage {
      path: output.to_path_buf(),
      html,
    })
  }
}
