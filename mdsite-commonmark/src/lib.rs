//! # mdsite-commonmark
//!
//! The Markdown layer of mdsite: CommonMark with GitHub Flavored extensions,
//! rendered by `comrak`, plus the line-based title extraction used to label
//! index listings.
//!
//! ## Quick Start
//!
//! ```rust
//! use mdsite_commonmark::{MarkdownOptions, MarkdownProcessor, first_heading};
//!
//! let markdown = "# Hello World\n\nThis is **bold** text.";
//! let processor = MarkdownProcessor::new(MarkdownOptions::default())?;
//! let html = processor.render(markdown)?;
//!
//! assert!(html.contains("<strong>bold</strong>"));
//! assert_eq!(first_heading(markdown).as_deref(), Some("Hello World"));
//! # Ok::<(), mdsite_commonmark::ProcessError>(())
//! ```
//!
//! ## Rendering rules
//!
//! - tables, strikethrough, autolinks and task lists (`gfm` feature)
//! - every heading carries an `id` slug (`<h2 id="usage">`), repeated slugs
//!   are suffixed `-1`, `-2`
//! - single newlines become `<br />`
//! - code blocks are highlighted with a fixed theme (`syntect` feature)
//! - raw HTML in the input is not passed through

pub mod processor;
pub mod syntax;
pub mod title;

pub use crate::{
  processor::{
    AstTransformer,
    MarkdownOptions,
    MarkdownOptionsBuilder,
    MarkdownProcessor,
    ProcessError,
    ProcessResult,
  },
  title::{TitleError, extract_title, extract_title_from_file, first_heading},
};
