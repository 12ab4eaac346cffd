//! Static page chrome for mdsite: the built-in stylesheet and the fixed
//! wrapper every rendered document is placed in.

use std::borrow::Cow;

pub const RESET_CSS: &str = include_str!("../templates/reset.css");
pub const DEFAULT_CSS: &str = include_str!("../templates/default.css");

/// Stylesheet embedded in every rendered page.
///
/// One value is shared by every page of a build. The built-in sheet is the
/// CSS reset followed by the default theme; [`Stylesheet::new`] swaps in a
/// different theme without touching the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
  css: Cow<'static, str>,
}

impl Stylesheet {
  /// Use `css` verbatim.
  #[must_use]
  pub fn new(css: impl Into<Cow<'static, str>>) -> Self {
    Self { css: css.into() }
  }

  /// The reset and default theme bundled with mdsite.
  #[must_use]
  pub fn builtin() -> Self {
    Self::new(format!("{RESET_CSS}{DEFAULT_CSS}"))
  }

  #[must_use]
  pub fn as_str(&self) -> &str {
    &self.css
  }

  /// Wrap a rendered body in the page template.
  ///
  /// The layout is fixed: a `<header>` holding the inline `<style>`, then a
  /// `<body>` with a single `<div id="container">` around the content.
  #[must_use]
  pub fn wrap_page(&self, body: &str) -> String {
    format!(
      "<header><style>{}</style></header>\n<body>\n<div \
       id=\"container\">\n{body}\n</div>\n</body>",
      self.css
    )
  }
}

impl Default for Stylesheet {
  fn default() -> Self {
    Self::builtin()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_builtin_contains_reset_and_theme() {
    let css = Stylesheet::builtin();
    assert!(css.as_str().starts_with(RESET_CSS));
    assert!(css.as_str().contains("prefers-color-scheme: dark"));
    for breakpoint in ["1200px", "992px", "576px"] {
      assert!(css.as_str().contains(breakpoint), "missing {breakpoint}");
    }
  }

  #[test]
  fn test_wrap_page_layout() {
    let page = Stylesheet::new("p{}").wrap_page("<p>hi</p>");
    assert_eq!(
      page,
      "<header><style>p{}</style></header>\n<body>\n<div \
       id=\"container\">\n<p>hi</p>\n</div>\n</body>"
    );
  }

  #[test]
  fn test_custom_stylesheet_replaces_builtin() {
    let page = Stylesheet::new(String::from("body{color:red}")).wrap_page("");
    assert!(page.contains("body{color:red}"));
    assert!(!page.contains("CSS Reset"));
  }
}
