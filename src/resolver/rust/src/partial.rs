/* src/resolver/rust/src/partial.rs */

//! `{{> name}}` inclusion. Runs on the raw template text before tokenizing,
//! so placeholders inside partial content resolve like any other.

use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ResolveError;

fn name_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"^[a-z0-9_-]+$").expect("valid partial name regex"))
}

// Rich-text editors serialize `>` as an entity; all spellings are accepted.
const INCLUDE_MARKERS: &[&str] = &[">", "&gt;", "&#62;", "&#x3e;", "&#x3E;"];

const ERROR_STYLE: &str =
  "color:#b91c1c;background:#fee2e2;padding:0 4px;border-radius:2px;font-family:monospace";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partial {
  pub id: String,
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub content: String,
}

impl Partial {
  pub fn new(id: impl Into<String>, name: impl Into<String>, content: impl Into<String>) -> Self {
    Self { id: id.into(), name: name.into(), description: None, content: content.into() }
  }
}

/// How deep `{{> name}}` references are followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartialExpansion {
  /// Only references in the template itself; references inside partial
  /// content stay as literal text.
  #[default]
  Single,
  /// Follow references inside included content up to `max_depth` levels,
  /// replacing cycles with an inline marker.
  Nested { max_depth: usize },
}

pub fn is_valid_partial_name(name: &str) -> bool {
  name_re().is_match(name)
}

pub fn validate_partials(partials: &[Partial]) -> Result<(), ResolveError> {
  let mut seen = HashSet::new();
  for partial in partials {
    if !is_valid_partial_name(&partial.name) {
      return Err(ResolveError::InvalidPartialName(partial.name.clone()));
    }
    if !seen.insert(partial.name.as_str()) {
      return Err(ResolveError::DuplicatePartialName(partial.name.clone()));
    }
  }
  Ok(())
}

/// Name-indexed view over a partial list. Entries with an invalid name, and
/// later entries repeating a name, are left out so references to them render
/// the not-found marker instead of failing the whole template.
#[derive(Debug, Clone, Default)]
pub struct PartialLibrary<'p> {
  by_name: HashMap<&'p str, &'p Partial>,
  rejected: Vec<&'p str>,
}

impl<'p> PartialLibrary<'p> {
  pub fn new(partials: &'p [Partial]) -> Self {
    let mut by_name = HashMap::with_capacity(partials.len());
    let mut rejected = Vec::new();
    for partial in partials {
      let name = partial.name.as_str();
      if !is_valid_partial_name(name) {
        warn!(name, id = %partial.id, "invalid partial name, skipped");
        rejected.push(name);
      } else if by_name.contains_key(name) {
        warn!(name, id = %partial.id, "duplicate partial name, skipped");
        rejected.push(name);
      } else {
        by_name.insert(name, partial);
      }
    }
    Self { by_name, rejected }
  }

  /// Names left out of the library, in input order.
  pub fn rejected(&self) -> &[&'p str] {
    &self.rejected
  }

  pub fn get(&self, name: &str) -> Option<&'p Partial> {
    self.by_name.get(name).copied()
  }

  pub fn len(&self) -> usize {
    self.by_name.len()
  }

  pub fn is_empty(&self) -> bool {
    self.by_name.is_empty()
  }
}

struct Reference<'t> {
  start: usize,
  end: usize,
  name: &'t str,
}

/// Match `{{`, marker, optional whitespace, name, optional whitespace, `}}`
/// starting exactly at `start`.
fn reference_at(text: &str, start: usize) -> Option<Reference<'_>> {
  let rest = text[start..].strip_prefix("{{")?;
  let rest = INCLUDE_MARKERS.iter().find_map(|m| rest.strip_prefix(m))?;
  let rest = rest.trim_start();
  let name_len =
    rest.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-')).unwrap_or(rest.len());
  if name_len == 0 {
    return None;
  }
  let name = &rest[..name_len];
  let tail = rest[name_len..].trim_start().strip_prefix("}}")?;
  Some(Reference { start, end: text.len() - tail.len(), name })
}

fn references(text: &str) -> Vec<Reference<'_>> {
  let mut refs = Vec::new();
  let mut pos = 0;
  while let Some(rel) = text[pos..].find("{{") {
    let start = pos + rel;
    match reference_at(text, start) {
      Some(found) => {
        pos = found.end;
        refs.push(found);
      }
      // step one byte so `{{{> a}}` still finds the reference at offset 1
      None => pos = start + 1,
    }
  }
  refs
}

/// Names referenced by `template`, first occurrence order, deduplicated.
pub fn partial_references(template: &str) -> Vec<String> {
  let mut seen = HashSet::new();
  references(template)
    .into_iter()
    .filter(|r| seen.insert(r.name))
    .map(|r| r.name.to_string())
    .collect()
}

fn not_found_marker(name: &str) -> String {
  format!(r#"<span class="partial-error" style="{ERROR_STYLE}">Partial not found: {name}</span>"#)
}

fn cycle_marker(stack: &[&str], name: &str) -> String {
  let mut chain = stack.join(" \u{2192} ");
  chain.push_str(" \u{2192} ");
  chain.push_str(name);
  format!(r#"<span class="partial-error" style="{ERROR_STYLE}">Partial cycle: {chain}</span>"#)
}

pub(crate) fn expand_partials(
  template: &str,
  library: &PartialLibrary<'_>,
  mode: PartialExpansion,
) -> String {
  let levels = match mode {
    PartialExpansion::Single => 1,
    PartialExpansion::Nested { max_depth } => max_depth.max(1),
  };
  let mut stack = Vec::new();
  expand_level(template, library, levels, &mut stack)
}

fn expand_level<'p>(
  text: &str,
  library: &PartialLibrary<'p>,
  levels: usize,
  stack: &mut Vec<&'p str>,
) -> String {
  let refs = references(text);
  if refs.is_empty() {
    return text.to_string();
  }

  let mut out = String::with_capacity(text.len());
  let mut last = 0;
  for reference in refs {
    out.push_str(&text[last..reference.start]);
    last = reference.end;

    let Some(partial) = library.get(reference.name) else {
      warn!(name = reference.name, "partial not found");
      out.push_str(&not_found_marker(reference.name));
      continue;
    };
    let name = partial.name.as_str();
    if stack.contains(&name) {
      warn!(name, "partial cycle");
      out.push_str(&cycle_marker(stack, name));
    } else if levels > 1 {
      stack.push(name);
      out.push_str(&expand_level(&partial.content, library, levels - 1, stack));
      stack.pop();
    } else {
      out.push_str(&partial.content);
    }
  }
  out.push_str(&text[last..]);
  out
}
