/* src/resolver/rust/src/html.rs */

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

fn empty_paragraph_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| {
    Regex::new(r"(?i)<p(\s[^>]*)?>(?:\s|&nbsp;)*</p>").expect("valid empty paragraph regex")
  })
}

pub(crate) fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for ch in s.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#x27;"),
      c => out.push(c),
    }
  }
  out
}

/// Rich-text renderers collapse `<p></p>`; give blank lines a `&nbsp;` so
/// they survive display.
pub(crate) fn fill_empty_paragraphs(html: &str) -> Cow<'_, str> {
  empty_paragraph_re().replace_all(html, "<p${1}>&nbsp;</p>")
}
