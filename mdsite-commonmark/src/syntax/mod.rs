//! Syntax highlighting for fenced and indented code blocks.
//!
//! Backends implement [`SyntaxHighlighter`] and are driven through a
//! [`SyntaxManager`]. The only backend shipped today is **Syntect**, extended
//! with two-face grammars and themes.

pub mod error;
pub mod types;

pub use error::{SyntaxError, SyntaxResult};
pub use types::{PLAIN_TEXT, SyntaxConfig, SyntaxHighlighter, SyntaxManager};

#[cfg(feature = "syntect")] mod syntect;
#[cfg(feature = "syntect")] pub use syntect::*;

/// Create the default syntax manager based on available features.
///
/// # Errors
///
/// Returns [`SyntaxError::NoBackendAvailable`] when built without a backend,
/// or [`SyntaxError::ThemeNotFound`] when `theme` is unknown to the backend.
pub fn create_default_manager(
  theme: Option<&str>,
) -> SyntaxResult<SyntaxManager> {
  #[cfg(feature = "syntect")]
  {
    create_syntect_manager(theme)
  }

  #[cfg(not(feature = "syntect"))]
  {
    let _ = theme;
    Err(SyntaxError::NoBackendAvailable)
  }
}
