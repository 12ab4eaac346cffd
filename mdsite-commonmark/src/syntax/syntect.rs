//! Syntect-based syntax highlighting backend enhanced with two-face.
//!
//! Grammars come from two-face's extended syntax set, themes from syntect's
//! bundled defaults plus two-face's embedded collection.

use std::sync::OnceLock;

use syntect::{
  highlighting::{Theme, ThemeSet},
  html::highlighted_html_for_string,
  parsing::SyntaxSet,
};
use two_face::theme::EmbeddedLazyThemeSet;

use super::{
  error::{SyntaxError, SyntaxResult},
  types::{SyntaxConfig, SyntaxHighlighter, SyntaxManager},
};

/// Theme used when neither the caller nor the configuration names one.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Syntect-based syntax highlighter
#[derive(Debug, Clone)]
pub struct SyntectHighlighter {
  theme_name: String,
}

impl SyntectHighlighter {
  /// Create a new Syntect highlighter with the specified default theme.
  #[must_use]
  pub fn new(theme_name: Option<String>) -> Self {
    Self {
      theme_name: theme_name.unwrap_or_else(|| DEFAULT_THEME.to_string()),
    }
  }

  fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(two_face::syntax::extra_newlines)
  }

  fn embedded_theme_set() -> &'static EmbeddedLazyThemeSet {
    static THEME_SET: OnceLock<EmbeddedLazyThemeSet> = OnceLock::new();
    THEME_SET.get_or_init(two_face::theme::extra)
  }

  fn default_theme_set() -> &'static ThemeSet {
    static DEFAULT_THEME_SET: OnceLock<ThemeSet> = OnceLock::new();
    DEFAULT_THEME_SET.get_or_init(ThemeSet::load_defaults)
  }

  /// Look a theme up by name, syntect's bundled themes first.
  ///
  /// Embedded themes match their display name (`Catppuccin Mocha`) or their
  /// variant name (`CatppuccinMocha`), ignoring ASCII case.
  fn find_theme(name: &str) -> Option<&'static Theme> {
    if let Some(theme) = Self::default_theme_set().themes.get(name) {
      return Some(theme);
    }

    EmbeddedLazyThemeSet::theme_names()
      .iter()
      .copied()
      .find(|embedded| {
        embedded.as_name().eq_ignore_ascii_case(name)
          || format!("{embedded:?}").eq_ignore_ascii_case(name)
      })
      .map(|embedded| Self::embedded_theme_set().get(embedded))
  }
}

impl Default for SyntectHighlighter {
  fn default() -> Self {
    Self::new(None)
  }
}

impl SyntaxHighlighter for SyntectHighlighter {
  fn name(&self) -> &'static str {
    "Syntect"
  }

  fn available_themes(&self) -> Vec<String> {
    let mut themes: Vec<String> =
      Self::default_theme_set().themes.keys().cloned().collect();
    themes.extend(
      EmbeddedLazyThemeSet::theme_names()
        .iter()
        .map(|embedded| embedded.as_name().to_string()),
    );
    themes.sort();
    themes.dedup();
    themes
  }

  fn supports_language(&self, language: &str) -> bool {
    Self::syntax_set().find_syntax_by_token(language).is_some()
  }

  fn highlight(
    &self,
    code: &str,
    language: &str,
    theme: Option<&str>,
  ) -> SyntaxResult<String> {
    let syntax_set = Self::syntax_set();
    let syntax = syntax_set
      .find_syntax_by_token(language)
      .unwrap_or_else(|| syntax_set.find_syntax_plain_text());

    let theme_name = theme.unwrap_or(&self.theme_name);
    let theme = Self::find_theme(theme_name)
      .ok_or_else(|| SyntaxError::ThemeNotFound(theme_name.to_string()))?;

    highlighted_html_for_string(code, syntax_set, syntax, theme)
      .map_err(|e| SyntaxError::HighlightingFailed(e.to_string()))
  }
}

/// Create a Syntect-based syntax manager using `theme` as its default.
///
/// # Errors
///
/// Returns [`SyntaxError::ThemeNotFound`] if the theme is unknown, so that a
/// misspelled theme fails before any page is rendered.
pub fn create_syntect_manager(
  theme: Option<&str>,
) -> SyntaxResult<SyntaxManager> {
  let theme = theme.unwrap_or(DEFAULT_THEME);
  if SyntectHighlighter::find_theme(theme).is_none() {
    return Err(SyntaxError::ThemeNotFound(theme.to_string()));
  }

  let highlighter = Box::new(SyntectHighlighter::new(Some(theme.to_string())));
  let config = SyntaxConfig {
    default_theme: Some(theme.to_string()),
    ..SyntaxConfig::default()
  };
  Ok(SyntaxManager::new(highlighter, config))
}
