use std::path::PathBuf;

use clap::Parser;

/// Command line interface for mdsite
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "Render a tree of Markdown documents into a static HTML site"
)]
pub struct Cli {
  /// Directory containing the Markdown documents
  pub source: Option<PathBuf>,

  /// Directory the site is written to [default: out]
  pub destination: Option<PathBuf>,

  /// Enable verbose debug logging
  #[arg(short, long)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times). Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(short = 'c', long = "config-file", action = clap::ArgAction::Append)]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,

  /// Number of threads to render with (0 uses every CPU)
  #[arg(short, long)]
  pub jobs: Option<usize>,

  /// Syntax highlighting theme for code blocks
  #[arg(long)]
  pub theme: Option<String>,

  /// Stylesheet embedded in every page instead of the built-in one
  #[arg(long)]
  pub stylesheet: Option<PathBuf>,

  /// Disable syntax highlighting of code blocks
  #[arg(long)]
  pub no_highlight: bool,

  /// Also generate an index for the source directory itself
  #[arg(long)]
  pub index_root: bool,
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }

  /// Whether the user named anything to build from: a source directory, a
  /// config file or a `--config` override. Without any of these a broken
  /// discovered config file is not worth failing over.
  #[must_use]
  pub fn names_build_input(&self) -> bool {
    self.source.is_some()
      || !self.config_files.is_empty()
      || !self.config_overrides.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_is_well_formed() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_positionals_and_flags() {
    let cli = Cli::try_parse_from([
      "mdsite",
      "notes",
      "site",
      "-v",
      "-j",
      "4",
      "--theme",
      "InspiredGitHub",
      "--no-highlight",
      "--index-root",
      "-c",
      "a.toml",
      "-c",
      "b.json",
      "--config",
      "hard_wraps=false",
    ])
    .expect("Failed to parse arguments");

    assert_eq!(cli.source, Some(PathBuf::from("notes")));
    assert_eq!(cli.destination, Some(PathBuf::from("site")));
    assert!(cli.verbose);
    assert_eq!(cli.jobs, Some(4));
    assert_eq!(cli.theme.as_deref(), Some("InspiredGitHub"));
    assert!(cli.no_highlight);
    assert!(cli.index_root);
    assert_eq!(
      cli.config_files,
      [PathBuf::from("a.toml"), PathBuf::from("b.json")]
    );
    assert_eq!(cli.config_overrides, ["hard_wraps=false"]);
  }

  #[test]
  fn test_no_arguments() {
    let cli = Cli::try_parse_from(["mdsite"]).expect("Failed to parse");
    assert_eq!(cli.source, None);
    assert_eq!(cli.destination, None);
    assert!(!cli.no_highlight);
    assert!(!cli.names_build_input());
  }

  #[test]
  fn test_names_build_input() {
    for args in [
      &["mdsite", "notes"][..],
      &["mdsite", "-c", "site.toml"],
      &["mdsite", "--config", "source_dir=notes"],
    ] {
      let cli = Cli::try_parse_from(args).expect("Failed to parse");
      assert!(cli.names_build_input(), "{args:?}");
    }

    let cli = Cli::try_parse_from(["mdsite", "-v", "--no-highlight"])
      .expect("Failed to parse");
    assert!(!cli.names_build_input());
  }
}
