use std::{
  fs,
  path::{Path, PathBuf},
};

use log::info;
use mdsite_commonmark::MarkdownOptions;
use mdsite_templates::Stylesheet;
use serde::{Deserialize, Serialize};

use crate::{cli::Cli, error::SiteError};

/// Default highlighting theme for code blocks.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// File names looked up in the working directory when no config file is
/// given explicitly.
const CONFIG_FILENAMES: [&str; 2] = ["mdsite.toml", "mdsite.json"];

/// Configuration for an mdsite build.
///
/// Fields are typically loaded from a TOML or JSON config file, then
/// overridden by `--config KEY=VALUE` flags and finally by the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Directory tree of Markdown documents to render.
  pub source_dir: Option<PathBuf>,

  /// Directory the site is written to.
  pub output_dir: PathBuf,

  /// Number of worker threads. Unset or `1` builds sequentially, `0` uses
  /// one thread per CPU.
  pub jobs: Option<usize>,

  /// Whether to syntax highlight code blocks.
  pub highlight_code: bool,

  /// Theme used for highlighted code blocks.
  pub highlight_theme: String,

  /// Whether a single newline inside a paragraph becomes a line break.
  pub hard_wraps: bool,

  /// Stylesheet embedded in every page instead of the built-in one.
  pub stylesheet: Option<PathBuf>,

  /// Also generate an index for the source directory itself.
  pub index_root: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      source_dir:      None,
      output_dir:      PathBuf::from("out"),
      jobs:            None,
      highlight_code:  true,
      highlight_theme: DEFAULT_THEME.to_string(),
      hard_wraps:      true,
      stylesheet:      None,
      index_root:      false,
    }
  }
}

/// The keys one config file actually sets.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PartialConfig {
  source_dir:      Option<PathBuf>,
  output_dir:      Option<PathBuf>,
  jobs:            Option<usize>,
  highlight_code:  Option<bool>,
  highlight_theme: Option<String>,
  hard_wraps:      Option<bool>,
  stylesheet:      Option<PathBuf>,
  index_root:      Option<bool>,
}

impl PartialConfig {
  fn from_file(path: &Path) -> Result<Self, SiteError> {
    let content = fs::read_to_string(path).map_err(SiteError::io(path))?;

    let extension = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase);

    match extension.as_deref() {
      Some("toml") => Ok(toml::from_str(&content)?),
      Some("json") => Ok(serde_json::from_str(&content)?),
      Some(_) => {
        Err(SiteError::Config(format!(
          "Unsupported config file format: {}",
          path.display()
        )))
      },
      None => {
        Err(SiteError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        )))
      },
    }
  }
}

impl Config {
  /// Load configuration from a file (TOML or JSON). Keys the file does not
  /// set keep their defaults.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format
  /// is unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SiteError> {
    let mut config = Self::default();
    config.apply_file(path.as_ref())?;
    Ok(config)
  }

  /// Layer the keys set in a config file over this config.
  fn apply_file(&mut self, path: &Path) -> Result<(), SiteError> {
    self.merge(PartialConfig::from_file(path)?);
    Ok(())
  }

  /// Load configuration from the given files, or a discovered one, then
  /// apply `KEY=VALUE` overrides.
  ///
  /// Files are merged in order, later files taking precedence.
  ///
  /// # Errors
  ///
  /// Returns an error if a config file cannot be loaded or an override is
  /// invalid.
  pub fn load(
    config_files: &[PathBuf],
    config_overrides: &[String],
  ) -> Result<Self, SiteError> {
    let mut config = Self::default();

    if config_files.is_empty() {
      if let Some(discovered) = Self::find_config_file() {
        info!("Using discovered config file: {}", discovered.display());
        config.apply_file(&discovered)?;
      }
    } else {
      for config_path in config_files {
        config.apply_file(config_path)?;
      }
      if config_files.len() > 1 {
        info!("Loaded and merged {} config files", config_files.len());
      }
    }

    config.apply_overrides(config_overrides)?;
    Ok(config)
  }

  /// Search the working directory for a config file.
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    Self::find_config_file_in(&current_dir)
  }

  fn find_config_file_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
      .iter()
      .map(|name| dir.join(name))
      .find(|path| path.is_file())
  }

  /// Merge the keys a config file set into this config. Keys the file
  /// left out keep their current value, even when it differs from the
  /// default.
  fn merge(&mut self, other: PartialConfig) {
    if let Some(source_dir) = other.source_dir {
      self.source_dir = Some(source_dir);
    }
    if let Some(output_dir) = other.output_dir {
      self.output_dir = output_dir;
    }
    if let Some(jobs) = other.jobs {
      self.jobs = Some(jobs);
    }
    if let Some(highlight_code) = other.highlight_code {
      self.highlight_code = highlight_code;
    }
    if let Some(highlight_theme) = other.highlight_theme {
      self.highlight_theme = highlight_theme;
    }
    if let Some(hard_wraps) = other.hard_wraps {
      self.hard_wraps = hard_wraps;
    }
    if let Some(stylesheet) = other.stylesheet {
      self.stylesheet = Some(stylesheet);
    }
    if let Some(index_root) = other.index_root {
      self.index_root = index_root;
    }
  }

  /// Apply configuration overrides from `KEY=VALUE` strings.
  ///
  /// # Errors
  ///
  /// Returns an error if an override is not in `KEY=VALUE` format, the key
  /// is unknown, or the value cannot be parsed.
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), SiteError> {
    for override_str in overrides {
      let (key, value) = override_str.split_once('=').ok_or_else(|| {
        SiteError::Config(format!(
          "Invalid config override format: '{override_str}'. Expected \
           KEY=VALUE"
        ))
      })?;

      self.apply_override(key.trim(), value.trim())?;
    }

    Ok(())
  }

  /// Set a single configuration key from its string form.
  ///
  /// An empty value clears optional keys.
  ///
  /// # Errors
  ///
  /// Returns an error if the key is unknown or the value cannot be parsed.
  pub fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), SiteError> {
    match key {
      "source_dir" => self.source_dir = optional_path(value),
      "output_dir" => self.output_dir = PathBuf::from(value),
      "jobs" => {
        self.jobs = if value.is_empty() {
          None
        } else {
          Some(value.parse().map_err(|_| {
            SiteError::Config(format!("Invalid value for '{key}': '{value}'"))
          })?)
        };
      },
      "highlight_code" => self.highlight_code = parse_bool(key, value)?,
      "highlight_theme" => self.highlight_theme = value.to_string(),
      "hard_wraps" => self.hard_wraps = parse_bool(key, value)?,
      "stylesheet" => self.stylesheet = optional_path(value),
      "index_root" => self.index_root = parse_bool(key, value)?,
      _ => {
        return Err(SiteError::Config(format!(
          "Unknown configuration key: '{key}'"
        )));
      },
    }
    Ok(())
  }

  /// Merge CLI arguments into this config, prioritizing CLI values when
  /// present.
  pub fn merge_with_cli(&mut self, cli: &Cli) {
    if let Some(source) = &cli.source {
      self.source_dir = Some(source.clone());
    }
    if let Some(destination) = &cli.destination {
      self.output_dir.clone_from(destination);
    }

    self.jobs = cli.jobs.or(self.jobs);

    if let Some(theme) = &cli.theme {
      self.highlight_theme.clone_from(theme);
    }
    if let Some(stylesheet) = &cli.stylesheet {
      self.stylesheet = Some(stylesheet.clone());
    }
    if cli.no_highlight {
      self.highlight_code = false;
    }
    if cli.index_root {
      self.index_root = true;
    }
  }

  /// Check that the configured paths can be used for a build.
  ///
  /// # Errors
  ///
  /// Returns an error listing every problem found.
  pub fn validate(&self) -> Result<(), SiteError> {
    let mut errors = Vec::new();

    match &self.source_dir {
      None => errors.push("No source directory given".to_string()),
      Some(source) if !source.exists() => {
        errors.push(format!(
          "Source directory does not exist: {}",
          source.display()
        ));
      },
      Some(source) if !source.is_dir() => {
        errors.push(format!(
          "Source path is not a directory: {}",
          source.display()
        ));
      },
      Some(_) => {},
    }

    if let Some(stylesheet) = &self.stylesheet
      && !stylesheet.is_file()
    {
      errors.push(format!(
        "Stylesheet file does not exist: {}",
        stylesheet.display()
      ));
    }

    if errors.is_empty() {
      Ok(())
    } else {
      Err(SiteError::Config(format!(
        "Configuration path validation errors:\n{}",
        errors.join("\n")
      )))
    }
  }

  /// Number of threads a build runs on.
  #[must_use]
  pub fn worker_count(&self) -> usize {
    match self.jobs {
      None => 1,
      Some(0) => num_cpus::get(),
      Some(jobs) => jobs,
    }
  }

  /// Options for the Markdown processor.
  #[must_use]
  pub fn markdown_options(&self) -> MarkdownOptions {
    MarkdownOptions {
      hard_wraps: self.hard_wraps,
      highlight_code: self.highlight_code,
      highlight_theme: Some(self.highlight_theme.clone()),
      ..MarkdownOptions::default()
    }
  }

  /// The stylesheet embedded in every page.
  ///
  /// # Errors
  ///
  /// Returns an error if a custom stylesheet is configured but cannot be
  /// read.
  pub fn load_stylesheet(&self) -> Result<Stylesheet, SiteError> {
    match &self.stylesheet {
      Some(path) => {
        let css = fs::read_to_string(path).map_err(SiteError::io(path))?;
        info!("Using stylesheet {}", path.display());
        Ok(Stylesheet::new(css))
      },
      None => Ok(Stylesheet::builtin()),
    }
  }
}

fn optional_path(value: &str) -> Option<PathBuf> {
  (!value.is_empty()).then(|| PathBuf::from(value))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, SiteError> {
  match value.to_lowercase().as_str() {
    "true" | "yes" | "on" | "1" => Ok(true),
    "false" | "no" | "off" | "0" => Ok(false),
    _ => {
      Err(SiteError::Config(format!(
        "Invalid boolean value for '{key}': '{value}'"
      )))
    },
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::field_reassign_with_default, reason = "Fine in tests")]

  use super::*;

  fn overrides(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
  }

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.source_dir, None);
    assert_eq!(config.output_dir, PathBuf::from("out"));
    assert_eq!(config.highlight_theme, DEFAULT_THEME);
    assert!(config.highlight_code);
    assert!(config.hard_wraps);
    assert!(!config.index_root);
    assert_eq!(config.worker_count(), 1);
  }

  #[test]
  fn test_from_toml_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("mdsite.toml");
    fs::write(
      &path,
      "source_dir = \"notes\"\nhighlight_theme = \"InspiredGitHub\"\njobs = 4\n",
    )
    .expect("write config");

    let config = Config::from_file(&path).expect("load toml");
    assert_eq!(config.source_dir, Some(PathBuf::from("notes")));
    assert_eq!(config.highlight_theme, "InspiredGitHub");
    assert_eq!(config.jobs, Some(4));
    assert_eq!(config.output_dir, PathBuf::from("out"));
  }

  #[test]
  fn test_from_json_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("mdsite.json");
    fs::write(&path, r#"{"output_dir": "public", "index_root": true}"#)
      .expect("write config");

    let config = Config::from_file(&path).expect("load json");
    assert_eq!(config.output_dir, PathBuf::from("public"));
    assert!(config.index_root);
  }

  #[test]
  fn test_from_file_rejects_unknown_format() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("mdsite.yaml");
    fs::write(&path, "output_dir: public").expect("write config");

    let err = Config::from_file(&path).expect_err("yaml is unsupported");
    assert!(err.to_string().contains("Unsupported config file format"));
  }

  #[test]
  fn test_from_file_reports_parse_errors() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "jobs = \"many\"").expect("write config");

    assert!(matches!(
      Config::from_file(&path),
      Err(SiteError::Toml(_))
    ));
  }

  #[test]
  fn test_load_merges_files_in_order() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let first = dir.path().join("first.toml");
    let second = dir.path().join("second.toml");
    fs::write(&first, "source_dir = \"a\"\nhard_wraps = false\n")
      .expect("write first");
    fs::write(&second, "source_dir = \"b\"\n").expect("write second");

    let config = Config::load(&[first, second], &overrides(&["jobs=2"]))
      .expect("load configs");
    assert_eq!(config.source_dir, Some(PathBuf::from("b")));
    assert!(!config.hard_wraps);
    assert_eq!(config.jobs, Some(2));
  }

  #[test]
  fn test_find_config_file_in_dir() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    assert_eq!(Config::find_config_file_in(dir.path()), None);

    fs::write(dir.path().join("mdsite.json"), "{}").expect("write json");
    fs::write(dir.path().join("mdsite.toml"), "").expect("write toml");
    assert_eq!(
      Config::find_config_file_in(dir.path()),
      Some(dir.path().join("mdsite.toml"))
    );
  }

  #[test]
  fn test_merge_keeps_unset_keys() {
    let mut base = Config::default();
    base.source_dir = Some(PathBuf::from("base"));
    base.highlight_code = false;

    base.merge(PartialConfig {
      stylesheet: Some(PathBuf::from("site.css")),
      highlight_theme: Some("InspiredGitHub".to_string()),
      ..PartialConfig::default()
    });
    assert_eq!(base.source_dir, Some(PathBuf::from("base")));
    assert!(!base.highlight_code);
    assert_eq!(base.stylesheet, Some(PathBuf::from("site.css")));
    assert_eq!(base.highlight_theme, "InspiredGitHub");
  }

  #[test]
  fn test_later_file_can_restore_defaults() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let first = dir.path().join("a.toml");
    let second = dir.path().join("b.toml");
    fs::write(&first, "hard_wraps = false\noutput_dir = \"public\"\n")
      .expect("write a.toml");
    fs::write(&second, "hard_wraps = true\noutput_dir = \"out\"\n")
      .expect("write b.toml");

    let config = Config::load(&[first, second], &[]).expect("load configs");
    assert!(config.hard_wraps);
    assert_eq!(config.output_dir, PathBuf::from("out"));
  }

  #[test]
  fn test_json_file_restores_defaults() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let first = dir.path().join("a.json");
    let second = dir.path().join("b.json");
    fs::write(&first, r#"{"index_root": true, "highlight_code": false}"#)
      .expect("write a.json");
    fs::write(&second, r#"{"highlight_code": true}"#).expect("write b.json");

    let config = Config::load(&[first, second], &[]).expect("load configs");
    assert!(config.highlight_code);
    assert!(config.index_root);
  }

  #[test]
  fn test_apply_overrides() {
    let mut config = Config::default();
    config
      .apply_overrides(&overrides(&[
        "source_dir=/tmp/notes",
        "output_dir = /tmp/site",
        "highlight_code=no",
        "hard_wraps=off",
        "index_root=1",
        "jobs=8",
        "highlight_theme=Solarized (dark)",
      ]))
      .expect("apply overrides");

    assert_eq!(config.source_dir, Some(PathBuf::from("/tmp/notes")));
    assert_eq!(config.output_dir, PathBuf::from("/tmp/site"));
    assert!(!config.highlight_code);
    assert!(!config.hard_wraps);
    assert!(config.index_root);
    assert_eq!(config.jobs, Some(8));
    assert_eq!(config.highlight_theme, "Solarized (dark)");
  }

  #[test]
  fn test_apply_override_empty_clears_optional() {
    let mut config = Config::default();
    config.jobs = Some(3);
    config.stylesheet = Some(PathBuf::from("a.css"));

    config.apply_override("jobs", "").expect("clear jobs");
    config.apply_override("stylesheet", "").expect("clear stylesheet");
    assert_eq!(config.jobs, None);
    assert_eq!(config.stylesheet, None);
  }

  #[test]
  fn test_apply_overrides_errors() {
    let mut config = Config::default();

    let err = config
      .apply_overrides(&overrides(&["no_equals_sign"]))
      .expect_err("missing '='");
    assert!(err.to_string().contains("Expected KEY=VALUE"));

    let err = config
      .apply_overrides(&overrides(&["title=Docs"]))
      .expect_err("unknown key");
    assert!(err.to_string().contains("Unknown configuration key"));

    let err = config
      .apply_overrides(&overrides(&["index_root=maybe"]))
      .expect_err("bad boolean");
    assert!(err.to_string().contains("Invalid boolean"));

    let err = config
      .apply_overrides(&overrides(&["jobs=lots"]))
      .expect_err("bad number");
    assert!(err.to_string().contains("Invalid value"));
  }

  #[test]
  fn test_cli_takes_precedence() {
    use clap::Parser as _;

    let mut config = Config::default();
    config.source_dir = Some(PathBuf::from("from-file"));
    config.jobs = Some(2);
    config.stylesheet = Some(PathBuf::from("file.css"));

    let cli = Cli::try_parse_from([
      "mdsite",
      "notes",
      "site",
      "--theme",
      "InspiredGitHub",
      "--no-highlight",
      "--index-root",
    ])
    .expect("Failed to parse arguments");
    config.merge_with_cli(&cli);

    assert_eq!(config.source_dir, Some(PathBuf::from("notes")));
    assert_eq!(config.output_dir, PathBuf::from("site"));
    assert_eq!(config.jobs, Some(2));
    assert_eq!(config.highlight_theme, "InspiredGitHub");
    assert_eq!(config.stylesheet, Some(PathBuf::from("file.css")));
    assert!(!config.highlight_code);
    assert!(config.index_root);
  }

  #[test]
  fn test_validate() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file = dir.path().join("a.md");
    fs::write(&file, "# A").expect("write a.md");

    let mut config = Config::default();
    assert!(config.validate().is_err());

    config.source_dir = Some(dir.path().join("missing"));
    let err = config.validate().expect_err("missing source");
    assert!(err.to_string().contains("does not exist"));

    config.source_dir = Some(file);
    let err = config.validate().expect_err("source is a file");
    assert!(err.to_string().contains("not a directory"));

    config.source_dir = Some(dir.path().to_path_buf());
    config.validate().expect("valid source");

    config.stylesheet = Some(dir.path().join("missing.css"));
    assert!(config.validate().is_err());
  }

  #[test]
  fn test_worker_count() {
    let mut config = Config::default();
    config.jobs = Some(1);
    assert_eq!(config.worker_count(), 1);
    config.jobs = Some(6);
    assert_eq!(config.worker_count(), 6);
    config.jobs = Some(0);
    assert_eq!(config.worker_count(), num_cpus::get());
  }

  #[test]
  fn test_markdown_options_follow_config() {
    let mut config = Config::default();
    config.hard_wraps = false;
    config.highlight_code = false;
    config.highlight_theme = "InspiredGitHub".to_string();

    let options = config.markdown_options();
    assert!(!options.hard_wraps);
    assert!(!options.highlight_code);
    assert!(options.header_ids);
    assert_eq!(options.highlight_theme.as_deref(), Some("InspiredGitHub"));
  }

  #[test]
  fn test_load_stylesheet() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let css = dir.path().join("site.css");
    fs::write(&css, "body{color:red}").expect("write css");

    let mut config = Config::default();
    assert_eq!(
      config.load_stylesheet().expect("builtin"),
      Stylesheet::builtin()
    );

    config.stylesheet = Some(css);
    assert_eq!(
      config.load_stylesheet().expect("custom").as_str(),
      "body{color:red}"
    );
  }
}
