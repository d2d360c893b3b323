/* src/resolver/rust/src/parser.rs */

use serde::Serialize;

use crate::ast::AstNode;
use crate::eval::Condition;
use crate::token::Token;

/// Diagnostic emitted when block tags are mismatched or unclosed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseDiagnostic {
  pub kind: DiagnosticKind,
  pub directive: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
  /// Close or `else` tag without a matching open (e.g. orphan `/if`)
  UnmatchedBlockClose,
  /// Block-open tag that reached end of input without its close
  UnclosedBlock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
  Each,
  If,
  Unless,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive<'a> {
  Open(BlockKind, &'a str),
  Else,
  Close(BlockKind),
  Placeholder(&'a str),
  /// Anything written back verbatim: unexpanded partial references,
  /// unsupported helpers, empty tags.
  Literal,
}

/// `#if expr` -> `expr`; the keyword must be followed by whitespace or end.
fn keyword_arg<'a>(body: &'a str, keyword: &str) -> Option<&'a str> {
  let rest = body.strip_prefix(keyword)?;
  if rest.is_empty() || rest.starts_with(char::is_whitespace) { Some(rest.trim()) } else { None }
}

fn classify(body: &str) -> Directive<'_> {
  if let Some(path) = keyword_arg(body, "#each") {
    return if path.is_empty() { Directive::Literal } else { Directive::Open(BlockKind::Each, path) };
  }
  if let Some(expr) = keyword_arg(body, "#if") {
    return Directive::Open(BlockKind::If, expr);
  }
  if let Some(expr) = keyword_arg(body, "#unless") {
    return Directive::Open(BlockKind::Unless, expr);
  }
  match body {
    "else" => Directive::Else,
    "/each" => Directive::Close(BlockKind::Each),
    "/if" => Directive::Close(BlockKind::If),
    "/unless" => Directive::Close(BlockKind::Unless),
    "" => Directive::Literal,
    _ if body.starts_with(['#', '/', '>', '&']) => Directive::Literal,
    _ => Directive::Placeholder(body),
  }
}

#[cfg(test)]
fn parse(tokens: &[Token]) -> Vec<AstNode> {
  let mut diagnostics = Vec::new();
  parse_with_diagnostics(tokens, &mut diagnostics)
}

pub(crate) fn parse_with_diagnostics(
  tokens: &[Token],
  diagnostics: &mut Vec<ParseDiagnostic>,
) -> Vec<AstNode> {
  let mut pos = 0;
  parse_until(tokens, &mut pos, &|_| false, diagnostics)
}

fn directive_at(tokens: &[Token], pos: usize) -> Option<Directive<'_>> {
  match tokens.get(pos)? {
    Token::Tag { body, .. } => Some(classify(body)),
    Token::Text(_) => None,
  }
}

fn parse_until(
  tokens: &[Token],
  pos: &mut usize,
  stop: &dyn Fn(Directive<'_>) -> bool,
  diagnostics: &mut Vec<ParseDiagnostic>,
) -> Vec<AstNode> {
  let mut nodes = Vec::new();

  while *pos < tokens.len() {
    let (body, raw) = match &tokens[*pos] {
      Token::Text(value) => {
        nodes.push(AstNode::Text(value.clone()));
        *pos += 1;
        continue;
      }
      Token::Tag { body, raw } => (body, raw),
    };

    let directive = classify(body);
    if stop(directive) {
      return nodes;
    }
    *pos += 1;

    match directive {
      Directive::Open(BlockKind::Each, path) => {
        let body_nodes =
          parse_until(tokens, pos, &|d| d == Directive::Close(BlockKind::Each), diagnostics);
        close_block(tokens, pos, body, diagnostics);
        nodes.push(AstNode::Each { path: path.to_string(), body_nodes });
      }
      Directive::Open(kind @ (BlockKind::If | BlockKind::Unless), expr) => {
        let condition = Condition::parse(expr);
        let then_nodes = parse_until(
          tokens,
          pos,
          &|d| d == Directive::Else || d == Directive::Close(kind),
          diagnostics,
        );
        let else_nodes = if directive_at(tokens, *pos) == Some(Directive::Else) {
          *pos += 1;
          parse_until(tokens, pos, &|d| d == Directive::Close(kind), diagnostics)
        } else {
          Vec::new()
        };
        close_block(tokens, pos, body, diagnostics);
        nodes.push(AstNode::If {
          condition,
          negate: kind == BlockKind::Unless,
          then_nodes,
          else_nodes,
        });
      }
      Directive::Else | Directive::Close(_) => {
        diagnostics.push(ParseDiagnostic {
          kind: DiagnosticKind::UnmatchedBlockClose,
          directive: body.clone(),
        });
      }
      Directive::Placeholder(path) => {
        nodes.push(AstNode::Placeholder { path: path.to_string(), raw: raw.clone() });
      }
      Directive::Literal => nodes.push(AstNode::Text(raw.clone())),
    }
  }

  nodes
}

/// Skip the close tag the inner `parse_until` stopped at; if it ran to EOF
/// instead, record the opener as unclosed.
fn close_block(
  tokens: &[Token],
  pos: &mut usize,
  opener: &str,
  diagnostics: &mut Vec<ParseDiagnostic>,
) {
  if matches!(directive_at(tokens, *pos), Some(Directive::Close(_))) {
    *pos += 1;
  } else {
    diagnostics.push(ParseDiagnostic {
      kind: DiagnosticKind::UnclosedBlock,
      directive: opener.to_string(),
    });
  }
}
