/* src/cli/core/src/main.rs */

mod catalog;
mod config;
mod inputs;
mod preview;
mod ui;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::{find_folio_config, load_folio_config, FolioConfig};
use inputs::Sources;

#[derive(Parser)]
#[command(name = "folio", about = "Folio template preview CLI")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Args)]
struct InputArgs {
  /// Template HTML file
  template: PathBuf,
  /// JSON data context (defaults to the built-in sample company)
  #[arg(long)]
  context: Option<PathBuf>,
  /// Directory of *.html partials, or a JSON array of partials
  #[arg(short, long)]
  partials: Option<PathBuf>,
  /// JSON array of custom placeholder definitions
  #[arg(long)]
  custom: Option<PathBuf>,
  /// Expand partial references found inside partials
  #[arg(long)]
  nested_partials: bool,
  /// Path to folio.toml (auto-detected if omitted)
  #[arg(short, long)]
  config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
  /// Render a template with its partials and data
  Preview {
    #[command(flatten)]
    input: InputArgs,
    /// Write the HTML here instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
  },
  /// Report unknown partials, unknown placeholders and unbalanced blocks
  Check {
    #[command(flatten)]
    input: InputArgs,
  },
  /// List the placeholders an author can insert
  Catalog {
    /// Print the palette as JSON
    #[arg(long)]
    json: bool,
  },
}

/// Logs go to stderr so previews can be piped; `FOLIO_LOG` sets the filter.
fn init_tracing() {
  let filter = EnvFilter::try_from_env("FOLIO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

/// Explicit config must load; an auto-detected one is optional.
fn resolve_config(explicit: Option<&Path>) -> Result<(PathBuf, FolioConfig)> {
  let cwd = std::env::current_dir().context("failed to get cwd")?;
  let path = match explicit {
    Some(p) => p.to_path_buf(),
    None => match find_folio_config(&cwd) {
      Ok(p) => p,
      Err(_) => return Ok((cwd, FolioConfig::default())),
    },
  };
  let config = load_folio_config(&path)?;
  let base_dir = path.parent().map_or(cwd, Path::to_path_buf);
  tracing::debug!(config = %path.display(), "loaded config");
  Ok((base_dir, config))
}

/// Flags win over `[preview]`.
fn sources(input: &InputArgs) -> Result<Sources> {
  let (base_dir, config) = resolve_config(input.config.as_deref())?;
  let mut sources = Sources::from_section(&config.preview, &base_dir);
  if let Some(path) = &input.context {
    sources.context = Some(path.clone());
  }
  if let Some(path) = &input.partials {
    sources.partials = Some(path.clone());
  }
  if let Some(path) = &input.custom {
    sources.custom = Some(path.clone());
  }
  if input.nested_partials {
    sources.nested_partials = true;
  }
  Ok(sources)
}

fn main() -> Result<ExitCode> {
  init_tracing();
  let cli = Cli::parse();

  match cli.command {
    Command::Preview { input, out } => {
      let inputs = inputs::load(&input.template, &sources(&input)?)?;
      preview::run_preview(&inputs, out.as_deref())
    }
    Command::Check { input } => {
      let inputs = inputs::load(&input.template, &sources(&input)?)?;
      preview::run_check(&inputs, &input.template)
    }
    Command::Catalog { json } => {
      catalog::run_catalog(json)?;
      Ok(ExitCode::SUCCESS)
    }
  }
}
