/* src/resolver/wasm/src/lib.rs */

use folio_resolver::{
  CustomPlaceholder, DataContext, Partial, PREVIEW_ERROR_MESSAGE, Preview, Resolver,
};
use serde_json::json;
use wasm_bindgen::prelude::*;

fn error_json() -> String {
  json!({ "error": PREVIEW_ERROR_MESSAGE }).to_string()
}

/// Resolve a template for the editor preview.
///
/// Returns `{"html", "diagnostics"}` or `{"error"}`. An empty context falls
/// back to the sample company; unreadable context, partial or custom JSON
/// fails the preview.
#[wasm_bindgen]
pub fn resolve(template: &str, context_json: &str, partials_json: &str, custom_json: &str) -> String {
  let context = if context_json.trim().is_empty() {
    DataContext::sample()
  } else {
    match serde_json::from_str::<DataContext>(context_json) {
      Ok(context) => context,
      Err(_) => return error_json(),
    }
  };
  let partials: Vec<Partial> = match parse_list(partials_json) {
    Some(list) => list,
    None => return error_json(),
  };
  let custom: Vec<CustomPlaceholder> = match parse_list(custom_json) {
    Some(list) => list,
    None => return error_json(),
  };

  match Resolver::new(&partials).with_custom_placeholders(&custom).preview(template, &context) {
    Preview::Rendered(resolution) => serde_json::to_string(&resolution).unwrap_or_else(|_| error_json()),
    Preview::Failed { message } => json!({ "error": message }).to_string(),
  }
}

/// Empty input is an empty list.
fn parse_list<T: serde::de::DeserializeOwned>(raw: &str) -> Option<Vec<T>> {
  if raw.trim().is_empty() {
    return Some(Vec::new());
  }
  serde_json::from_str(raw).ok()
}

/// Placeholder palette, grouped by category, as JSON.
#[wasm_bindgen]
pub fn catalog() -> String {
  serde_json::to_string(&folio_resolver::palette(&[], &[])).unwrap_or_else(|_| "[]".to_string())
}

#[wasm_bindgen]
pub fn sanitize_key(label: &str) -> String {
  folio_resolver::sanitize_key(label)
}
