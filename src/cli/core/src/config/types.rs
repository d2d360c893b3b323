/* src/cli/core/src/config/types.rs */

use anyhow::{Result, bail};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FolioConfig {
  #[serde(default)]
  pub preview: PreviewSection,
}

/// `[preview]`. Paths are relative to the directory holding `folio.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewSection {
  /// Directory of `*.html` partials or a JSON array of partials
  pub partials: Option<String>,
  /// JSON data context; the sample context is used when unset
  pub context: Option<String>,
  /// JSON array of custom placeholder definitions
  pub custom: Option<String>,
  #[serde(default)]
  pub nested_partials: bool,
  #[serde(default = "default_max_partial_depth")]
  pub max_partial_depth: usize,
  pub generated_by: Option<String>,
}

impl Default for PreviewSection {
  fn default() -> Self {
    Self {
      partials: None,
      context: None,
      custom: None,
      nested_partials: false,
      max_partial_depth: default_max_partial_depth(),
      generated_by: None,
    }
  }
}

fn default_max_partial_depth() -> usize {
  8
}

impl PreviewSection {
  pub fn validate(&self) -> Result<()> {
    if self.max_partial_depth == 0 {
      bail!("preview.max_partial_depth must be at least 1");
    }
    for (field, value) in
      [("partials", &self.partials), ("context", &self.context), ("custom", &self.custom)]
    {
      if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
        bail!("preview.{field} must not be empty");
      }
    }
    Ok(())
  }
}
