//! Type definitions for the Markdown processor.
//!
//! # Examples
//!
//! ```
//! use mdsite_commonmark::{MarkdownOptions, MarkdownProcessor};
//!
//! let options = MarkdownOptions {
//!   gfm: true,
//!   highlight_code: false,
//!   ..Default::default()
//! };
//!
//! let processor = MarkdownProcessor::new(options).unwrap();
//! ```

use std::sync::Arc;

use comrak::nodes::{AstNode, NodeValue};

use super::error::ProcessResult;
use crate::syntax::SyntaxManager;

/// Options for configuring the Markdown processor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(
  clippy::struct_excessive_bools,
  reason = "Config struct with related boolean flags"
)]
pub struct MarkdownOptions {
  /// Enable the GitHub Flavored Markdown extensions: tables, strikethrough,
  /// autolinks and task lists.
  pub gfm: bool,

  /// Give every heading an `id` derived from its text.
  pub header_ids: bool,

  /// Render single newlines inside a paragraph as `<br />`.
  pub hard_wraps: bool,

  /// Enable syntax highlighting for code blocks.
  pub highlight_code: bool,

  /// Optional: syntax highlighting theme name, backend default when `None`.
  pub highlight_theme: Option<String>,
}

impl Default for MarkdownOptions {
  fn default() -> Self {
    Self {
      gfm:             cfg!(feature = "gfm"),
      header_ids:      true,
      hard_wraps:      true,
      highlight_code:  cfg!(feature = "syntect"),
      highlight_theme: None,
    }
  }
}

/// Main Markdown processor.
///
/// Can be cheaply cloned and shared between threads; the syntax manager sits
/// behind an [`Arc`].
#[derive(Debug, Clone)]
pub struct MarkdownProcessor {
  pub(crate) options:        MarkdownOptions,
  pub(crate) syntax_manager: Option<Arc<SyntaxManager>>,
}

/// Trait for AST transformations applied between parsing and rendering.
pub trait AstTransformer {
  /// Transform `node` and its descendants in place.
  ///
  /// # Errors
  ///
  /// Returns an error if a node cannot be transformed; rendering stops.
  fn transform<'a>(&self, node: &'a AstNode<'a>) -> ProcessResult<()>;
}

/// Replaces code blocks with syntax highlighted markup.
///
/// Fenced and indented blocks are both handled. The first word of a fence's
/// info string selects the language; blocks without one are highlighted as
/// plain text so every block carries the theme's colors.
pub struct CodeBlockHighlighter<'m> {
  manager: &'m SyntaxManager,
  theme:   Option<&'m str>,
}

impl<'m> CodeBlockHighlighter<'m> {
  #[must_use]
  pub const fn new(
    manager: &'m SyntaxManager,
    theme: Option<&'m str>,
  ) -> Self {
    Self { manager, theme }
  }
}

impl AstTransformer for CodeBlockHighlighter<'_> {
  fn transform<'a>(&self, node: &'a AstNode<'a>) -> ProcessResult<()> {
    for descendant in node.descendants() {
      let highlighted = {
        let data = descendant.data.borrow();
        let NodeValue::CodeBlock(ref block) = data.value else {
          continue;
        };
        let language =
          block.info.split_whitespace().next().unwrap_or_default();
        self
          .manager
          .highlight_code(&block.literal, language, self.theme)?
      };

      descendant.data.borrow_mut().value = NodeValue::Raw(highlighted);
    }

    Ok(())
  }
}

/// Builder for constructing `MarkdownOptions` with method chaining.
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptionsBuilder {
  options: MarkdownOptions,
}

impl MarkdownOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Enable or disable GitHub Flavored Markdown.
  #[must_use]
  pub const fn gfm(mut self, enabled: bool) -> Self {
    self.options.gfm = enabled;
    self
  }

  /// Enable or disable heading ids.
  #[must_use]
  pub const fn header_ids(mut self, enabled: bool) -> Self {
    self.options.header_ids = enabled;
    self
  }

  /// Enable or disable hard line wraps.
  #[must_use]
  pub const fn hard_wraps(mut self, enabled: bool) -> Self {
    self.options.hard_wraps = enabled;
    self
  }

  /// Enable or disable syntax highlighting.
  #[must_use]
  pub const fn highlight_code(mut self, enabled: bool) -> Self {
    self.options.highlight_code = enabled;
    self
  }

  /// Set the syntax highlighting theme.
  #[must_use]
  pub fn highlight_theme<S: Into<String>>(mut self, theme: Option<S>) -> Self {
    self.options.highlight_theme = theme.map(Into::into);
    self
  }

  /// Build the final `MarkdownOptions`.
  #[must_use]
  pub fn build(self) -> MarkdownOptions {
    self.options
  }
}
