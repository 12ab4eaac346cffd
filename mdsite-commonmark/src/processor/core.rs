//! Core implementation of the Markdown processor.
use std::sync::Arc;

use comrak::{
  Arena,
  options::{Options, Plugins},
  parse_document,
};
use log::trace;

use super::{
  error::ProcessResult,
  extensions::HeadingIdAdapter,
  types::{
    AstTransformer,
    CodeBlockHighlighter,
    MarkdownOptions,
    MarkdownProcessor,
  },
};
use crate::syntax::create_default_manager;

impl MarkdownProcessor {
  /// Create a new `MarkdownProcessor` with the given options.
  ///
  /// # Errors
  ///
  /// Returns an error if highlighting is enabled and no backend is available,
  /// or if the configured theme does not exist.
  pub fn new(options: MarkdownOptions) -> ProcessResult<Self> {
    let syntax_manager = if options.highlight_code {
      let theme = options.highlight_theme.as_deref();
      Some(Arc::new(create_default_manager(theme)?))
    } else {
      None
    };

    Ok(Self {
      options,
      syntax_manager,
    })
  }

  /// Render Markdown to an HTML fragment.
  ///
  /// # Errors
  ///
  /// Returns an error if a code block cannot be highlighted or the document
  /// cannot be formatted.
  pub fn render(&self, markdown: &str) -> ProcessResult<String> {
    let arena = Arena::new();
    let options = self.comrak_options();
    let root = parse_document(&arena, markdown, &options);

    if let Some(manager) = &self.syntax_manager {
      let theme = self.options.highlight_theme.as_deref();
      CodeBlockHighlighter::new(manager, theme).transform(root)?;
    }

    let mut html = String::with_capacity(markdown.len() * 2);
    if self.options.header_ids {
      let adapter = HeadingIdAdapter::new();
      let mut plugins = Plugins::default();
      plugins.render.heading_adapter = Some(&adapter);
      comrak::format_html_with_plugins(root, &options, &mut html, &plugins)?;
    } else {
      comrak::format_html(root, &options, &mut html)?;
    }
    trace!("Rendered {} bytes of Markdown", markdown.len());

    Ok(html)
  }

  /// Build comrak options from `MarkdownOptions`.
  ///
  /// Raw HTML stays disabled and comrak writes void elements in XHTML form
  /// (`<br />`, `<hr />`). Heading ids are not set here: comrak's own ids
  /// land on an inner anchor, so `render` installs a [`HeadingIdAdapter`].
  fn comrak_options(&self) -> Options<'_> {
    let mut options = Options::default();
    if self.options.gfm {
      options.extension.table = true;
      options.extension.strikethrough = true;
      options.extension.tasklist = true;
      options.extension.autolink = true;
    }
    options.render.hardbreaks = self.options.hard_wraps;
    options
  }
}
