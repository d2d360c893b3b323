/* src/resolver/rust/src/error.rs */

use thiserror::Error;

/// The only message a failed preview ever shows to the author.
pub const PREVIEW_ERROR_MESSAGE: &str = "Error generating preview";

/// Failures that abort a whole resolution. Missing data, unknown partials and
/// unrecognized conditions never end up here; they degrade inline instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
  #[error("invalid custom placeholder key `{0}` (expected [a-z0-9_]+)")]
  InvalidCustomKey(String),

  #[error("duplicate custom placeholder key `{0}`")]
  DuplicateCustomKey(String),

  #[error("invalid partial name `{0}` (expected [a-z0-9_-]+)")]
  InvalidPartialName(String),

  #[error("duplicate partial name `{0}`")]
  DuplicatePartialName(String),
}
