/* src/resolver/rust/src/custom.rs */

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ResolveError;
use crate::format::FieldFormat;

fn key_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"^[a-z0-9_]+$").expect("valid custom key regex"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomKind {
  #[default]
  Text,
  Date,
  Number,
  Currency,
  Boolean,
  Textarea,
}

impl CustomKind {
  pub fn format(self) -> FieldFormat {
    match self {
      Self::Text | Self::Textarea => FieldFormat::Text,
      Self::Date => FieldFormat::Date,
      Self::Number => FieldFormat::Number,
      Self::Currency => FieldFormat::Currency,
      Self::Boolean => FieldFormat::Boolean,
    }
  }
}

/// Author-declared field resolved through `{{custom.<key>}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomPlaceholder {
  pub id: String,
  pub key: String,
  pub label: String,
  #[serde(rename = "type", default)]
  pub kind: CustomKind,
  #[serde(default)]
  pub required: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub default_value: Option<String>,
}

impl CustomPlaceholder {
  /// Build a definition whose key is sanitized from the label.
  pub fn new(id: impl Into<String>, label: impl Into<String>, kind: CustomKind) -> Self {
    let label = label.into();
    Self {
      id: id.into(),
      key: sanitize_key(&label),
      label,
      kind,
      required: false,
      default_value: None,
    }
  }

  pub fn with_default(mut self, value: impl Into<String>) -> Self {
    self.default_value = Some(value.into());
    self
  }

  pub fn token(&self) -> String {
    format!("{{{{custom.{}}}}}", self.key)
  }
}

/// Lowercase, collapse every run outside `[a-z0-9]` into one `_`, trim `_`.
pub fn sanitize_key(label: &str) -> String {
  let mut key = String::with_capacity(label.len());
  let mut pending_sep = false;
  for ch in label.chars().flat_map(char::to_lowercase) {
    if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
      if pending_sep && !key.is_empty() {
        key.push('_');
      }
      pending_sep = false;
      key.push(ch);
    } else {
      pending_sep = true;
    }
  }
  key
}

pub fn is_valid_custom_key(key: &str) -> bool {
  key_re().is_match(key)
}

pub fn validate_custom_placeholders(defs: &[CustomPlaceholder]) -> Result<(), ResolveError> {
  let mut seen = HashSet::new();
  for def in defs {
    if !is_valid_custom_key(&def.key) {
      return Err(ResolveError::InvalidCustomKey(def.key.clone()));
    }
    if !seen.insert(def.key.as_str()) {
      return Err(ResolveError::DuplicateCustomKey(def.key.clone()));
    }
  }
  Ok(())
}
