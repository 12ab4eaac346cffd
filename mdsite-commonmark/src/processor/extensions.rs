//! Render-time plugins handed to comrak.

use std::{fmt, sync::Mutex};

use comrak::{
  Anchorizer,
  adapters::{HeadingAdapter, HeadingMeta},
  nodes::Sourcepos,
};

/// Writes headings as `<hN id="slug">...</hN>`.
///
/// Slugs come from comrak's anchorizer, so repeated headings get `-1`, `-2`
/// suffixes. One adapter must be used per document: it remembers every slug
/// it has handed out.
#[derive(Debug, Default)]
pub struct HeadingIdAdapter {
  anchorizer: Mutex<Anchorizer>,
}

impl HeadingIdAdapter {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  fn slug(&self, text: &str) -> Result<String, fmt::Error> {
    let mut anchorizer = self.anchorizer.lock().map_err(|_| fmt::Error)?;
    Ok(anchorizer.anchorize(text))
  }
}

impl HeadingAdapter for HeadingIdAdapter {
  fn enter(
    &self,
    output: &mut dyn fmt::Write,
    heading: &HeadingMeta,
    _sourcepos: Option<Sourcepos>,
  ) -> fmt::Result {
    let id = self.slug(&heading.content)?;
    write!(output, "<h{} id=\"{id}\">", heading.level)
  }

  fn exit(&self, output: &mut dyn fmt::Write, heading: &HeadingMeta) -> fmt::Result {
    writeln!(output, "</h{}>", heading.level)
  }
}
