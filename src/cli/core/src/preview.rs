/* src/cli/core/src/preview.rs */

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use folio_resolver::{PREVIEW_ERROR_MESSAGE, Resolver};

use crate::inputs::Inputs;
use crate::ui;

fn resolver(inputs: &Inputs) -> Resolver<'_> {
  Resolver::new(&inputs.partials)
    .with_custom_placeholders(&inputs.custom)
    .with_options(inputs.options)
}

/// Render to `out`, or to stdout when no file is given. A failed resolution
/// reports the editor's message with the underlying cause chained below it.
pub fn run_preview(inputs: &Inputs, out: Option<&Path>) -> Result<ExitCode> {
  let resolution =
    resolver(inputs).try_resolve(&inputs.template, &inputs.context).context(PREVIEW_ERROR_MESSAGE)?;

  match out {
    Some(path) => {
      std::fs::write(path, &resolution.html)
        .with_context(|| format!("failed to write {}", path.display()))?;
      ui::ok(&format!("{}  {} bytes", path.display(), resolution.html.len()));
      for diag in &resolution.diagnostics {
        ui::warn(&format!("{:?}: {{{{{}}}}}", diag.kind, diag.directive));
      }
    }
    None => {
      let mut stdout = std::io::stdout().lock();
      stdout.write_all(resolution.html.as_bytes()).context("failed to write to stdout")?;
      stdout.flush().context("failed to write to stdout")?;
    }
  }
  Ok(ExitCode::SUCCESS)
}

/// Report unknown partials, unknown placeholders and block mismatches.
pub fn run_check(inputs: &Inputs, template_path: &Path) -> Result<ExitCode> {
  let report = resolver(inputs)
    .check(&inputs.template)
    .with_context(|| format!("{} cannot be resolved", template_path.display()))?;

  ui::arrow(&format!("checking {}", template_path.display()));
  for name in &report.unknown_partials {
    ui::fail(&format!("unknown partial {{{{> {name}}}}}"));
  }
  for name in &report.rejected_partials {
    ui::fail(&format!("partial `{name}` skipped (invalid or duplicate name)"));
  }
  for path in &report.unknown_placeholders {
    ui::fail(&format!("unknown placeholder {{{{{path}}}}}"));
  }
  for diag in &report.diagnostics {
    ui::warn(&format!("{:?}: {{{{{}}}}}", diag.kind, diag.directive));
  }

  if report.is_clean() {
    ui::ok("no problems found");
    Ok(ExitCode::SUCCESS)
  } else {
    let total = report.unknown_partials.len()
      + report.rejected_partials.len()
      + report.unknown_placeholders.len()
      + report.diagnostics.len();
    ui::fail(&format!("{total} problem(s) found"));
    Ok(ExitCode::FAILURE)
  }
}
