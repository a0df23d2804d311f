//! Pretty-printed diagnostics, built on the same [`diag::Report`] the rest
//! of the ambient stack uses for source-pointing error output. Entirely
//! optional: nothing in [`crate::session`] calls into this module, and a
//! caller that only cares about the raw [`crate::session::RemainderState`]
//! can ignore it.

use diag::{Report, Source};
use span::Span;

use crate::session::{ParseResult, RemainderState};

/// Renders a message pointing at the fragment of `buffer` the grammar
/// couldn't yet resolve into a token, if `result` reports one. `None` for
/// `Complete`/`MaybeComplete` results, which have nothing left to point at.
pub fn remainder_report(buffer: &str, result: &ParseResult) -> Option<String> {
  if result.remainder_state != RemainderState::Incomplete {
    return None;
  }
  let start = buffer.len().checked_sub(result.remainder_string.len())?;
  let span = Span {
    start,
    end: buffer.len(),
  };

  let report = Report::error()
    .source(Source::string(buffer.to_string()))
    .message("buffer ends in a fragment the grammar does not yet recognize")
    .span(span)
    .build();

  let mut out = String::new();
  report.emit(&mut out).ok()?;
  Some(out)
}
