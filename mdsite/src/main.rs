use clap::CommandFactory;
use color_eyre::eyre::{Context, Result};
use log::{LevelFilter, info, warn};
use mdsite::{Config, build_site, cli::Cli};

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  // Config files first, then --config overrides, then flags and positionals
  let mut config = match Config::load(&cli.config_files, &cli.config_overrides)
  {
    Ok(config) => config,
    Err(err) if !cli.names_build_input() => {
      warn!("Ignoring config file: {err}");
      Cli::command().print_help()?;
      return Ok(());
    },
    Err(err) => return Err(err.into()),
  };
  config.merge_with_cli(&cli);

  // Nothing to build without a source directory
  let Some(source_dir) = config.source_dir.clone() else {
    Cli::command().print_help()?;
    return Ok(());
  };

  config.validate()?;

  info!("Building site from {}", source_dir.display());
  info!("Output directory: {}", config.output_dir.display());

  let summary = build_site(&config).wrap_err_with(|| {
    format!("Failed to build site from {}", source_dir.display())
  })?;

  info!(
    "Rendered {} page(s) and {} index(es) in {}us",
    summary.pages,
    summary.indexes,
    summary.elapsed.as_micros()
  );

  Ok(())
}
