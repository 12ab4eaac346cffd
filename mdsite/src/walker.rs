//! Source tree traversal and build execution.
//!
//! A build is planned first: one walk over the source tree yields an ordered
//! list of [`BuildTask`]s. The tasks are then executed either in walk order
//! or on a worker pool. Every task writes its own destination path, so the
//! order of execution does not change the output.

use std::{
  fs,
  path::{Path, PathBuf},
  time::{Duration, Instant},
};

use log::{debug, info};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::{
  config::Config,
  error::SiteError,
  index,
  page::PageRenderer,
  paths,
};

/// A unit of work produced by walking the source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildTask {
  /// Generate `output_dir/index.html` for the source directory `dir`.
  Index { dir: PathBuf, output_dir: PathBuf },
  /// Render the document `source` into `output`.
  Page { source: PathBuf, output: PathBuf },
}

/// What a build produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
  pub pages:   usize,
  pub indexes: usize,
  pub elapsed: Duration,
}

/// Walk `source_dir` and list the work needed to mirror it into
/// `output_dir`.
///
/// Entries are visited depth-first, sorted by file name. The source
/// directory itself only gets an index when `index_root` is set.
///
/// # Errors
///
/// Returns the first traversal error encountered.
pub fn plan_build(
  source_dir: &Path,
  output_dir: &Path,
  index_root: bool,
) -> Result<Vec<BuildTask>, SiteError> {
  let mut tasks = Vec::new();

  for entry in WalkDir::new(source_dir).sort_by_file_name() {
    let entry = entry?;
    let path = entry.path();

    if entry.file_type().is_dir() {
      if entry.depth() == 0 && !index_root {
        continue;
      }
      let rel = paths::relative_path(source_dir, path)?;
      tasks.push(BuildTask::Index {
        dir:        path.to_path_buf(),
        output_dir: output_dir.join(rel),
      });
    } else if paths::is_markdown(path) {
      let rel = paths::relative_path(source_dir, path)?;
      tasks.push(BuildTask::Page {
        source: path.to_path_buf(),
        output: paths::page_output_path(output_dir, &rel),
      });
    }
  }

  Ok(tasks)
}

/// Build the site described by `config`.
///
/// The first error stops the build. Files already written stay in place.
///
/// # Errors
///
/// Returns an error if the configuration is incomplete, the source tree
/// cannot be walked, or any page or index cannot be produced.
pub fn build_site(config: &Config) -> Result<BuildSummary, SiteError> {
  let start = Instant::now();
  let source_dir = config
    .source_dir
    .as_deref()
    .ok_or_else(|| SiteError::Config("No source directory given".into()))?;

  let renderer = PageRenderer::from_config(config)?;
  fs::create_dir_all(&config.output_dir)
    .map_err(SiteError::io(&config.output_dir))?;

  let tasks = plan_build(source_dir, &config.output_dir, config.index_root)?;
  let indexes = tasks
    .iter()
    .filter(|task| matches!(task, BuildTask::Index { .. }))
    .count();
  let pages = tasks.len() - indexes;
  info!("Found {pages} document(s) and {indexes} director(ies) to index");

  let workers = config.worker_count();
  if workers > 1 {
    debug!("Building on {workers} threads");
    let pool = rayon::ThreadPoolBuilder::new()
      .num_threads(workers)
      .build()?;
    pool.install(|| {
      tasks
        .par_iter()
        .try_for_each(|task| run_task(&renderer, task))
    })?;
  } else {
    for task in &tasks {
      run_task(&renderer, task)?;
    }
  }

  Ok(BuildSummary {
    pages,
    indexes,
    elapsed: start.elapsed(),
  })
}

/// Execute a single task.
///
/// # Errors
///
/// Returns an error if the page or index cannot be produced.
pub fn run_task(
  renderer: &PageRenderer,
  task: &BuildTask,
) -> Result<(), SiteError> {
  match task {
    BuildTask::Index { dir, output_dir } => {
      debug!("Indexing {}", dir.display());
      index::write_index(dir, output_dir).map(drop)
    },
    BuildTask::Page { source, output } => {
      debug!("Rendering {}", source.display());
      renderer.render_page(source, output)?.write()
    },
  }
}
