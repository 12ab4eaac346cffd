//! Error types for Markdown processing.

use crate::syntax::SyntaxError;

/// Result type for Markdown processing.
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Errors raised while turning Markdown into HTML.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
  #[error("Syntax highlighting error: {0}")]
  Syntax(#[from] SyntaxError),

  #[error("Failed to format HTML output")]
  Format(#[from] std::fmt::Error),
}
