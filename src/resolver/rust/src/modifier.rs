/* src/resolver/rust/src/modifier.rs */

//! `UCASE(...)`, `LCASE(...)`, `PCASE(...)` on the rendered document.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TextCase {
  Upper,
  Lower,
  Title,
}

impl TextCase {
  /// Sweep order; later sweeps see the output of earlier ones.
  const ALL: [Self; 3] = [Self::Upper, Self::Lower, Self::Title];

  fn function_name(self) -> &'static str {
    match self {
      Self::Upper => "UCASE",
      Self::Lower => "LCASE",
      Self::Title => "PCASE",
    }
  }

  fn apply(self, text: &str) -> String {
    match self {
      Self::Upper => text.to_uppercase(),
      Self::Lower => text.to_lowercase(),
      Self::Title => title_case(text),
    }
  }
}

fn title_case(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  let mut word_start = true;
  for ch in text.chars() {
    if ch.is_whitespace() {
      out.push(ch);
      word_start = true;
    } else if word_start {
      out.extend(ch.to_uppercase());
      word_start = false;
    } else {
      out.extend(ch.to_lowercase());
    }
  }
  out
}

/// One sweep: each `NAME(` takes the text up to the first `)` on the same
/// line as its argument. An opener with no `)` before the line ends is left
/// alone.
fn sweep(html: &str, case: TextCase) -> String {
  let opener = format!("{}(", case.function_name());
  let mut out = String::with_capacity(html.len());
  let mut pos = 0;

  while let Some(rel) = html[pos..].find(&opener) {
    let start = pos + rel;
    let arg_start = start + opener.len();
    let arg_len = html[arg_start..].find([')', '\n']);
    match arg_len {
      Some(len) if html[arg_start + len..].starts_with(')') => {
        out.push_str(&html[pos..start]);
        out.push_str(&case.apply(&html[arg_start..arg_start + len]));
        pos = arg_start + len + 1;
      }
      _ => {
        out.push_str(&html[pos..arg_start]);
        pos = arg_start;
      }
    }
  }

  out.push_str(&html[pos..]);
  out
}

pub(crate) fn apply_modifiers(html: &str) -> String {
  let mut out = html.to_string();
  for case in TextCase::ALL {
    if out.contains(case.function_name()) {
      out = sweep(&out, case);
    }
  }
  out
}
