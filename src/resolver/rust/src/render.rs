/* src/resolver/rust/src/render.rs */

use serde_json::Value;

use crate::ast::AstNode;
use crate::catalog::{classify, Collection, PlaceholderKind};
use crate::custom::CustomPlaceholder;
use crate::eval::{lookup, Condition};
use crate::format::{format_value, FieldFormat};
use crate::html::escape_html;

/// One `{{#each}}` iteration.
struct Frame<'a> {
  item: &'a Value,
  index: usize,
  collection: Option<Collection>,
}

impl Frame<'_> {
  fn knows(&self, field: &str) -> bool {
    self.item.get(field).is_some() || self.collection.and_then(|c| c.field(field)).is_some()
  }

  fn format_of(&self, path: &str) -> FieldFormat {
    let head = path.split('.').next().unwrap_or(path);
    self.collection.and_then(|c| c.field(head)).map_or(FieldFormat::Text, |e| e.format)
  }

  fn render_field(&self, path: &str) -> String {
    lookup(path, self.item)
      .map(|v| escape_html(&format_value(v, self.format_of(path))))
      .unwrap_or_default()
  }

  fn render_self(&self) -> String {
    match self.item {
      Value::Object(_) | Value::Array(_) => String::new(),
      scalar => escape_html(&format_value(scalar, FieldFormat::Text)),
    }
  }
}

pub(crate) struct RenderContext<'a> {
  pub(crate) root: &'a Value,
  pub(crate) custom: &'a [CustomPlaceholder],
  frames: Vec<Frame<'a>>,
}

impl<'a> RenderContext<'a> {
  pub(crate) fn new(root: &'a Value, custom: &'a [CustomPlaceholder]) -> Self {
    Self { root, custom, frames: Vec::new() }
  }
}

fn is_bare(path: &str) -> bool {
  !path.contains(['.', '['])
}

pub(crate) fn render(nodes: &[AstNode], ctx: &mut RenderContext<'_>) -> String {
  let mut out = String::new();

  for node in nodes {
    match node {
      AstNode::Text(value) => out.push_str(value),

      AstNode::Placeholder { path, raw } => match resolve_placeholder(path, ctx) {
        Some(value) => out.push_str(&value),
        None => out.push_str(raw),
      },

      AstNode::If { condition, negate, then_nodes, else_nodes } => {
        let value = condition_value(condition, ctx);
        if condition.evaluate(value) != *negate {
          out.push_str(&render(then_nodes, ctx));
        } else {
          out.push_str(&render(else_nodes, ctx));
        }
      }

      AstNode::Each { path, body_nodes } => {
        if let Some(Value::Array(items)) = each_target(path, ctx) {
          let last_segment = path.rsplit('.').next().unwrap_or(path);
          let collection = Collection::from_name(last_segment);
          for (index, item) in items.iter().enumerate() {
            ctx.frames.push(Frame { item, index, collection });
            out.push_str(&render(body_nodes, ctx));
            ctx.frames.pop();
          }
        }
      }
    }
  }

  out
}

/// `None` means the tag is not a recognised placeholder and is written back
/// as-is. Recognised placeholders with no data render as an empty string.
fn resolve_placeholder(path: &str, ctx: &RenderContext<'_>) -> Option<String> {
  if let Some(frame) = ctx.frames.last() {
    match path {
      "@index" => return Some(frame.index.to_string()),
      "@number" => return Some((frame.index + 1).to_string()),
      "this" => return Some(frame.render_self()),
      _ => {}
    }
    if let Some(field) = path.strip_prefix("this.") {
      return Some(frame.render_field(field));
    }
    if is_bare(path) && frame.knows(path) {
      return Some(frame.render_field(path));
    }
  }

  match classify(path) {
    PlaceholderKind::BuiltIn(entry) => Some(
      lookup(path, ctx.root).map(|v| escape_html(&format_value(v, entry.format))).unwrap_or_default(),
    ),
    PlaceholderKind::Custom(key) => resolve_custom(key, ctx),
    PlaceholderKind::Indexed { collection, index, field } => {
      let items = ctx.root.get(collection.name())?.as_array()?;
      let item = items.get(index)?;
      Some(
        item
          .get(field.key)
          .filter(|v| !v.is_null())
          .map(|v| escape_html(&format_value(v, field.format)))
          .unwrap_or_default(),
      )
    }
    PlaceholderKind::Unknown => None,
  }
}

/// Live value, then the definition's default, then empty. A key with
/// neither a definition nor a value is not recognised.
fn resolve_custom(key: &str, ctx: &RenderContext<'_>) -> Option<String> {
  let value = ctx
    .root
    .get("custom")
    .and_then(|c| c.get(key))
    .filter(|v| !v.is_null() && v.as_str() != Some(""));
  let Some(def) = ctx.custom.iter().find(|d| d.key == key) else {
    return value.map(|v| escape_html(&format_value(v, FieldFormat::Text)));
  };

  let format = def.kind.format();
  let rendered = match (value, &def.default_value) {
    (Some(v), _) => format_value(v, format),
    (None, Some(default)) => format_value(&Value::String(default.clone()), format),
    (None, None) => String::new(),
  };
  Some(escape_html(&rendered))
}

fn condition_value<'a>(condition: &Condition, ctx: &RenderContext<'a>) -> Option<&'a Value> {
  let field = condition.field();
  if let Some(frame) = ctx.frames.last() {
    if field == "this" {
      return Some(frame.item).filter(|v| !v.is_null());
    }
    if let Some(rest) = field.strip_prefix("this.") {
      return lookup(rest, frame.item);
    }
    if is_bare(field) {
      if let Some(value) = lookup(field, frame.item) {
        return Some(value);
      }
    }
  }
  lookup(field, ctx.root)
}

fn each_target<'a>(path: &str, ctx: &RenderContext<'a>) -> Option<&'a Value> {
  if let Some(frame) = ctx.frames.last() {
    if let Some(rest) = path.strip_prefix("this.") {
      return lookup(rest, frame.item);
    }
    if is_bare(path) {
      if let Some(value) = lookup(path, frame.item) {
        return Some(value);
      }
    }
  }
  lookup(path, ctx.root)
}
