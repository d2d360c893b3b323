/* src/resolver/rust/src/token.rs */

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Token {
  Text(String),
  /// `{{ body }}`; `raw` keeps the exact source so unknown tags can be
  /// written back untouched.
  Tag { body: String, raw: String },
}

pub(crate) const TAG_OPEN: &str = "{{";
pub(crate) const TAG_CLOSE: &str = "}}";

pub(crate) fn tokenize(template: &str) -> Vec<Token> {
  let mut tokens = Vec::new();
  let mut text_start = 0;
  let mut pos = 0;
  let bytes = template.as_bytes();

  while let Some(rel) = template[pos..].find(TAG_OPEN) {
    let mut open = pos + rel;
    let Some(close_rel) = template[open + TAG_OPEN.len()..].find(TAG_CLOSE) else {
      // Unclosed tag -- the rest is text
      break;
    };
    let close = open + TAG_OPEN.len() + close_rel;
    // `{{a {{b}}`: the tag starts at the last opener before the close
    if let Some(inner) = template[open + TAG_OPEN.len()..close].rfind(TAG_OPEN) {
      open += TAG_OPEN.len() + inner;
    }
    // `{{{x}}}`: extra braces stay in the surrounding text
    while open + TAG_OPEN.len() < close && bytes[open + TAG_OPEN.len()] == b'{' {
      open += 1;
    }

    if open > text_start {
      tokens.push(Token::Text(template[text_start..open].to_string()));
    }
    let end = close + TAG_CLOSE.len();
    tokens.push(Token::Tag {
      body: template[open + TAG_OPEN.len()..close].trim().to_string(),
      raw: template[open..end].to_string(),
    });
    text_start = end;
    pos = end;
  }

  if text_start < template.len() {
    tokens.push(Token::Text(template[text_start..].to_string()));
  }
  tokens
}
