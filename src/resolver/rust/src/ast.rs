/* src/resolver/rust/src/ast.rs */

use crate::eval::Condition;

#[derive(Debug)]
pub(crate) enum AstNode {
  Text(String),
  Placeholder { path: String, raw: String },
  Each { path: String, body_nodes: Vec<AstNode> },
  If { condition: Condition, negate: bool, then_nodes: Vec<AstNode>, else_nodes: Vec<AstNode> },
}
