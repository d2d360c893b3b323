/* src/cli/core/src/inputs.rs */

//! Reads a template and everything it resolves against from disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use folio_resolver::{
  CustomPlaceholder, DataContext, Partial, PartialExpansion, ResolveOptions,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::PreviewSection;

/// Input locations after merging command-line flags over `[preview]`.
#[derive(Debug, Clone)]
pub struct Sources {
  pub partials: Option<PathBuf>,
  pub context: Option<PathBuf>,
  pub custom: Option<PathBuf>,
  pub nested_partials: bool,
  pub max_partial_depth: usize,
  pub generated_by: Option<String>,
}

impl Sources {
  pub fn from_section(section: &PreviewSection, base_dir: &Path) -> Self {
    let join = |value: &Option<String>| value.as_deref().map(|p| base_dir.join(p));
    Self {
      partials: join(&section.partials),
      context: join(&section.context),
      custom: join(&section.custom),
      nested_partials: section.nested_partials,
      max_partial_depth: section.max_partial_depth,
      generated_by: section.generated_by.clone(),
    }
  }

  fn expansion(&self) -> PartialExpansion {
    if self.nested_partials {
      PartialExpansion::Nested { max_depth: self.max_partial_depth }
    } else {
      PartialExpansion::Single
    }
  }
}

pub struct Inputs {
  pub template: String,
  pub context: DataContext,
  pub partials: Vec<Partial>,
  pub custom: Vec<CustomPlaceholder>,
  pub options: ResolveOptions,
}

pub fn load(template: &Path, sources: &Sources) -> Result<Inputs> {
  let template = std::fs::read_to_string(template)
    .with_context(|| format!("failed to read {}", template.display()))?;

  let mut context = match &sources.context {
    Some(path) => read_json::<DataContext>(path)?,
    None => DataContext::sample(),
  };
  if let Some(generated_by) = &sources.generated_by {
    context.system.generated_by = Some(generated_by.clone());
  }

  let partials = match &sources.partials {
    Some(path) => load_partials(path)?,
    None => Vec::new(),
  };
  let custom = match &sources.custom {
    Some(path) => read_json(path)?,
    None => Vec::new(),
  };
  debug!(partials = partials.len(), custom = custom.len(), "inputs loaded");

  let options = ResolveOptions { partials: sources.expansion(), today: None };
  Ok(Inputs { template, context, partials, custom, options })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// A directory contributes one partial per `*.html` file, named by its stem;
/// anything else is read as a JSON array of partials.
pub fn load_partials(path: &Path) -> Result<Vec<Partial>> {
  if !path.is_dir() {
    return read_json(path);
  }

  let entries =
    std::fs::read_dir(path).with_context(|| format!("failed to read {}", path.display()))?;
  let mut partials = Vec::new();
  for entry in entries {
    let file = entry.with_context(|| format!("failed to read {}", path.display()))?.path();
    if file.extension().and_then(|e| e.to_str()) != Some("html") {
      continue;
    }
    let Some(name) = file.file_stem().and_then(|s| s.to_str()) else {
      continue;
    };
    let content = std::fs::read_to_string(&file)
      .with_context(|| format!("failed to read {}", file.display()))?;
    partials.push(Partial::new(name, name, content));
  }
  partials.sort_by(|a, b| a.name.cmp(&b.name));
  Ok(partials)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sources() -> Sources {
    Sources::from_section(&PreviewSection::default(), Path::new("."))
  }

  #[test]
  fn partials_from_directory() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("footer.html"), "<footer/>").unwrap();
    std::fs::write(tmp.path().join("header.html"), "<h1>{{company.name}}</h1>").unwrap();
    std::fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();

    let partials = load_partials(tmp.path()).unwrap();
    let names: Vec<_> = partials.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["footer", "header"]);
    assert_eq!(partials[1].content, "<h1>{{company.name}}</h1>");
  }

  #[test]
  fn partials_from_json() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("partials.json");
    std::fs::write(&path, r#"[{"id": "p1", "name": "sig", "content": "<em>x</em>"}]"#).unwrap();
    let partials = load_partials(&path).unwrap();
    assert_eq!(partials, vec![Partial::new("p1", "sig", "<em>x</em>")]);
  }

  #[test]
  fn sample_context_by_default() {
    let tmp = tempfile::tempdir().unwrap();
    let template = tmp.path().join("letter.html");
    std::fs::write(&template, "{{company.name}}").unwrap();

    let inputs = load(&template, &sources()).unwrap();
    assert_eq!(inputs.context, DataContext::sample());
    assert!(inputs.partials.is_empty());
    assert_eq!(inputs.options.partials, PartialExpansion::Single);
  }

  #[test]
  fn config_paths_and_overrides() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("t.html"), "").unwrap();
    std::fs::write(tmp.path().join("ctx.json"), r#"{"company": {"name": "Beta LLP"}}"#).unwrap();
    std::fs::write(
      tmp.path().join("custom.json"),
      r#"[{"id": "c1", "key": "amount", "label": "Amount", "type": "currency"}]"#,
    )
    .unwrap();

    let section: PreviewSection = toml::from_str(
      r#"
context = "ctx.json"
custom = "custom.json"
nested_partials = true
max_partial_depth = 2
generated_by = "Folio CI"
"#,
    )
    .unwrap();
    let sources = Sources::from_section(&section, tmp.path());
    let inputs = load(&tmp.path().join("t.html"), &sources).unwrap();

    assert_eq!(inputs.context.company.name.as_deref(), Some("Beta LLP"));
    assert_eq!(inputs.context.system.generated_by.as_deref(), Some("Folio CI"));
    assert_eq!(inputs.custom[0].key, "amount");
    assert_eq!(inputs.options.partials, PartialExpansion::Nested { max_depth: 2 });
  }

  #[test]
  fn missing_template_has_context() {
    let err = load(Path::new("/nonexistent/letter.html"), &sources()).err().unwrap();
    assert!(err.to_string().starts_with("failed to read /nonexistent/letter.html"));
  }
}
