//! Markdown processing.
//!
//! - [`core`]: the rendering pipeline of [`MarkdownProcessor`]
//! - [`types`]: options, the processor itself and AST transformers
//! - [`error`]: processing errors
//! - [`extensions`]: render plugins such as heading ids
pub mod core;
pub mod error;
pub mod extensions;
pub mod types;

pub use error::{ProcessError, ProcessResult};
pub use extensions::HeadingIdAdapter;
pub use types::{
  AstTransformer,
  CodeBlockHighlighter,
  MarkdownOptions,
  MarkdownOptionsBuilder,
  MarkdownProcessor,
};
