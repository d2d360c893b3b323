/* src/resolver/rust/src/check.rs */

//! Static inspection of a template without rendering it.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::ast::AstNode;
use crate::catalog::{classify, Collection, PlaceholderKind};
use crate::custom::CustomPlaceholder;
use crate::parser::ParseDiagnostic;

/// Problems an author should fix before saving a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateReport {
  /// `{{> name}}` references with no partial of that name.
  pub unknown_partials: Vec<String>,
  /// Library entries skipped for an invalid or repeated name.
  pub rejected_partials: Vec<String>,
  /// Placeholder paths that would be written back literally.
  pub unknown_placeholders: Vec<String>,
  pub diagnostics: Vec<ParseDiagnostic>,
}

impl TemplateReport {
  pub fn is_clean(&self) -> bool {
    self.unknown_partials.is_empty()
      && self.rejected_partials.is_empty()
      && self.unknown_placeholders.is_empty()
      && self.diagnostics.is_empty()
  }
}

/// `None` marks a loop over something other than a known collection, whose
/// element fields can't be checked.
type Scope = Option<Collection>;

pub(crate) fn unknown_placeholders(nodes: &[AstNode], custom: &[CustomPlaceholder]) -> Vec<String> {
  let mut found = BTreeSet::new();
  let mut scopes = Vec::new();
  collect(nodes, custom, &mut scopes, &mut found);
  found.into_iter().collect()
}

fn collect(
  nodes: &[AstNode],
  custom: &[CustomPlaceholder],
  scopes: &mut Vec<Scope>,
  found: &mut BTreeSet<String>,
) {
  for node in nodes {
    match node {
      AstNode::Text(_) => {}
      AstNode::Placeholder { path, .. } => {
        if !is_known(path, custom, scopes.last()) {
          found.insert(path.clone());
        }
      }
      AstNode::Each { path, body_nodes } => {
        let last_segment = path.rsplit('.').next().unwrap_or(path);
        scopes.push(Collection::from_name(last_segment));
        collect(body_nodes, custom, scopes, found);
        scopes.pop();
      }
      AstNode::If { then_nodes, else_nodes, .. } => {
        collect(then_nodes, custom, scopes, found);
        collect(else_nodes, custom, scopes, found);
      }
    }
  }
}

fn is_known(path: &str, custom: &[CustomPlaceholder], scope: Option<&Scope>) -> bool {
  if let Some(scope) = scope {
    if matches!(path, "@index" | "@number" | "this") {
      return true;
    }
    let field = path.strip_prefix("this.").unwrap_or(path);
    let head = field.split('.').next().unwrap_or(field);
    match scope {
      None if path.starts_with("this.") || !path.contains('.') => return true,
      Some(collection) if collection.field(head).is_some() => return true,
      _ => {}
    }
  }

  match classify(path) {
    PlaceholderKind::BuiltIn(_) | PlaceholderKind::Indexed { .. } => true,
    PlaceholderKind::Custom(key) => custom.iter().any(|d| d.key == key),
    PlaceholderKind::Unknown => false,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::custom::CustomKind;
  use crate::parser::parse_with_diagnostics;
  use crate::token::tokenize;

  fn unknown(template: &str, custom: &[CustomPlaceholder]) -> Vec<String> {
    let mut diags = Vec::new();
    let ast = parse_with_diagnostics(&tokenize(template), &mut diags);
    unknown_placeholders(&ast, custom)
  }

  #[test]
  fn builtins_are_known() {
    assert!(unknown("{{company.name}} {{system.currentDate}} {{directors[3].role}}", &[]).is_empty());
  }

  #[test]
  fn reports_unknown_once_sorted() {
    assert_eq!(unknown("{{zeta}} {{company.nick}} {{zeta}}", &[]), vec!["company.nick", "zeta"]);
  }

  #[test]
  fn loop_fields_known_only_inside_loop() {
    assert!(unknown("{{#each directors}}{{@number}} {{name}} {{this.role}}{{/each}}", &[]).is_empty());
    assert_eq!(unknown("{{name}} {{@index}}", &[]), vec!["@index", "name"]);
  }

  #[test]
  fn loop_fields_checked_against_collection() {
    assert_eq!(unknown("{{#each directors}}{{shareClass}}{{/each}}", &[]), vec!["shareClass"]);
    assert!(unknown("{{#each custom.items}}{{label}}{{/each}}", &[]).is_empty());
  }

  #[test]
  fn custom_keys_need_definitions() {
    let defs = vec![CustomPlaceholder::new("1", "Loan Amount", CustomKind::Currency)];
    assert_eq!(
      unknown("{{custom.loan_amount}} {{custom.other}}", &defs),
      vec!["custom.other"]
    );
  }
}
