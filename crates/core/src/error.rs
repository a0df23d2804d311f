use thiserror::Error as ThisError;

/// Errors that can escape the public API.
///
/// `LexStop` and `ParseStop` from the design are intentionally *not*
/// variants here: they are normal control flow inside [`crate::session::advance`]
/// and are folded into the returned `ParseResult` rather than surfaced as
/// errors.
#[derive(Debug, ThisError)]
pub enum Error {
  #[error("failed to compile grammar: {0}")]
  GrammarLoadFailure(String),
}
