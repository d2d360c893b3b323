/* src/resolver/rust/src/eval.rs */

//! Path lookups and `{{#if}}` / `{{#unless}}` condition evaluation.

use serde_json::{Number, Value};

/// Resolve a dotted path such as `company.address.block` or
/// `directors[1].name`. Missing segments and JSON null read as undefined.
pub(crate) fn lookup<'a>(path: &str, data: &'a Value) -> Option<&'a Value> {
  let mut current = data;
  for segment in path.split('.') {
    current = match split_index(segment) {
      Some((key, index)) => current.get(key)?.get(index)?,
      None => current.get(segment)?,
    };
  }
  Some(current).filter(|v| !v.is_null())
}

/// `directors[2]` -> (`directors`, 2)
pub(crate) fn split_index(segment: &str) -> Option<(&str, usize)> {
  let (key, index) = segment.strip_suffix(']')?.split_once('[')?;
  let index = index.parse().ok()?;
  Some((key, index))
}

/// Only `false`, `"false"` and `"0"` are falsy besides undefined. Empty
/// strings and the number 0 count as truthy.
pub(crate) fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::String(s) => s != "false" && s != "0",
    Value::Number(_) | Value::Array(_) | Value::Object(_) => true,
  }
}

pub(crate) fn stringify(value: &Value) -> String {
  match value {
    Value::Null => String::new(),
    Value::Bool(b) => b.to_string(),
    Value::Number(n) => number_to_string(n),
    Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}

// 60.0 prints as "60", matching what authors typed
fn number_to_string(n: &Number) -> String {
  if let Some(i) = n.as_i64() {
    i.to_string()
  } else if let Some(u) = n.as_u64() {
    u.to_string()
  } else {
    n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Condition {
  Truthy(String),
  Equals(String, String),
  NotEquals(String, String),
}

impl Condition {
  /// `field == 'literal'` or `field != 'literal'`. Any other expression is
  /// a truthiness check on the whole text, which an unknown path fails.
  pub(crate) fn parse(expr: &str) -> Self {
    let trimmed = expr.trim();
    Self::parse_comparison(trimmed).unwrap_or_else(|| Self::Truthy(trimmed.to_string()))
  }

  fn parse_comparison(expr: &str) -> Option<Self> {
    let (pos, negate) = [("==", false), ("!=", true)]
      .into_iter()
      .filter_map(|(op, negate)| expr.find(op).map(|pos| (pos, negate)))
      .min_by_key(|(pos, _)| *pos)?;

    let field = expr[..pos].trim();
    if field.is_empty() || field.contains(char::is_whitespace) {
      return None;
    }
    let quoted = expr[pos + 2..].trim().strip_prefix('\'')?;
    let end = quoted.find('\'')?;
    if !quoted[end + 1..].trim().is_empty() {
      return None;
    }

    let field = field.to_string();
    let literal = quoted[..end].to_string();
    Some(if negate { Self::NotEquals(field, literal) } else { Self::Equals(field, literal) })
  }

  pub(crate) fn field(&self) -> &str {
    match self {
      Self::Truthy(field) | Self::Equals(field, _) | Self::NotEquals(field, _) => field,
    }
  }

  pub(crate) fn evaluate(&self, value: Option<&Value>) -> bool {
    match self {
      Self::Truthy(_) => value.is_some_and(is_truthy),
      Self::Equals(_, literal) => value.is_some_and(|v| stringify(v) == *literal),
      Self::NotEquals(_, literal) => !value.is_some_and(|v| stringify(v) == *literal),
    }
  }
}
