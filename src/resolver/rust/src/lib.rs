/* src/resolver/rust/src/lib.rs */

mod ast;
mod catalog;
mod check;
mod context;
mod custom;
mod error;
mod eval;
mod format;
mod html;
mod modifier;
mod parser;
mod partial;
mod render;
mod token;

pub use catalog::{
  builtin, classify, entries, palette, CatalogEntry, Category, Collection, PaletteGroup,
  PaletteItem, PlaceholderKind,
};
pub use check::TemplateReport;
pub use context::{
  Address, Company, Contact, CustomValue, DataContext, Director, Shareholder, SystemFields,
};
pub use custom::{
  is_valid_custom_key, sanitize_key, validate_custom_placeholders, CustomKind, CustomPlaceholder,
};
pub use error::{ResolveError, PREVIEW_ERROR_MESSAGE};
pub use format::FieldFormat;
pub use parser::{DiagnosticKind, ParseDiagnostic};
pub use partial::{
  is_valid_partial_name, partial_references, validate_partials, Partial, PartialExpansion,
  PartialLibrary,
};

use chrono::{Local, NaiveDate};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use check::unknown_placeholders;
use html::fill_empty_paragraphs;
use modifier::apply_modifiers;
use parser::parse_with_diagnostics;
use partial::expand_partials;
use render::{render, RenderContext};
use token::tokenize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
  pub partials: PartialExpansion,
  /// Pins `system.currentDate`; the local date is used when unset.
  pub today: Option<NaiveDate>,
}

/// Rendered HTML plus any non-fatal block diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
  pub html: String,
  pub diagnostics: Vec<ParseDiagnostic>,
}

/// What the editor shows: the document, or the single failure message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
  Rendered(Resolution),
  Failed { message: String },
}

impl Preview {
  pub fn is_rendered(&self) -> bool {
    matches!(self, Self::Rendered(_))
  }

  pub fn into_html(self) -> String {
    match self {
      Self::Rendered(resolution) => resolution.html,
      Self::Failed { message } => message,
    }
  }
}

/// Resolves templates against one partial library and one set of custom
/// placeholder definitions.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'p> {
  partials: &'p [Partial],
  custom: &'p [CustomPlaceholder],
  options: ResolveOptions,
}

impl<'p> Resolver<'p> {
  pub fn new(partials: &'p [Partial]) -> Self {
    Self { partials, custom: &[], options: ResolveOptions::default() }
  }

  pub fn with_custom_placeholders(mut self, custom: &'p [CustomPlaceholder]) -> Self {
    self.custom = custom;
    self
  }

  pub fn with_options(mut self, options: ResolveOptions) -> Self {
    self.options = options;
    self
  }

  fn expand(&self, library: &PartialLibrary<'_>, template: &str) -> String {
    expand_partials(template, library, self.options.partials)
  }

  /// Context as a JSON tree, with `system.currentDate` filled in.
  fn root_value(&self, context: &DataContext) -> Value {
    let mut root = context.to_value();
    let today = self.options.today.unwrap_or_else(|| Local::now().date_naive());
    if let Some(system) = root.get_mut("system").and_then(Value::as_object_mut) {
      system.insert("currentDate".to_string(), Value::String(today.format("%Y-%m-%d").to_string()));
    }
    root
  }

  pub fn try_resolve(&self, template: &str, context: &DataContext) -> Result<Resolution, ResolveError> {
    validate_custom_placeholders(self.custom)?;

    let library = PartialLibrary::new(self.partials);
    let expanded = self.expand(&library, template);
    debug!(partials = library.len(), len = expanded.len(), "partials expanded");

    let tokens = tokenize(&expanded);
    let mut diagnostics = Vec::new();
    let ast = parse_with_diagnostics(&tokens, &mut diagnostics);
    for diag in &diagnostics {
      warn!(kind = ?diag.kind, directive = %diag.directive, "mismatched block tag");
    }

    let root = self.root_value(context);
    let mut ctx = RenderContext::new(&root, self.custom);
    let rendered = render(&ast, &mut ctx);
    debug!(tokens = tokens.len(), "placeholders and blocks rendered");

    let html = fill_empty_paragraphs(&apply_modifiers(&rendered)).into_owned();
    Ok(Resolution { html, diagnostics })
  }

  /// Never fails: a pipeline error becomes [`PREVIEW_ERROR_MESSAGE`].
  pub fn preview(&self, template: &str, context: &DataContext) -> Preview {
    match self.try_resolve(template, context) {
      Ok(resolution) => Preview::Rendered(resolution),
      Err(e) => {
        warn!(error = %e, "preview failed");
        Preview::Failed { message: PREVIEW_ERROR_MESSAGE.to_string() }
      }
    }
  }

  /// Unknown and rejected partials, unknown placeholders and block
  /// diagnostics, without rendering.
  pub fn check(&self, template: &str) -> Result<TemplateReport, ResolveError> {
    validate_custom_placeholders(self.custom)?;

    let library = PartialLibrary::new(self.partials);
    let unknown_partials =
      partial_references(template).into_iter().filter(|name| library.get(name).is_none()).collect();
    let rejected_partials = library.rejected().iter().map(|name| name.to_string()).collect();

    let expanded = self.expand(&library, template);
    let mut diagnostics = Vec::new();
    let ast = parse_with_diagnostics(&tokenize(&expanded), &mut diagnostics);
    let unknown_placeholders = unknown_placeholders(&ast, self.custom);

    Ok(TemplateReport { unknown_partials, rejected_partials, unknown_placeholders, diagnostics })
  }
}

/// Resolve `template` with default options and no custom definitions.
/// Returns the rendered HTML, or [`PREVIEW_ERROR_MESSAGE`] on failure.
pub fn resolve(template: &str, context: &DataContext, partials: &[Partial]) -> String {
  Resolver::new(partials).preview(template, context).into_html()
}

#[cfg(test)]
mod tests;
