//! Turns a buffer into a token list using a compiled [`GrammarRuntime`]'s
//! terminal patterns. Stops cleanly at the first unrecognized character or
//! at end of buffer; never raises out of [`lex`] (see module-level contract
//! in the design doc, §4.1).

use span::Span;

use crate::grammar::{GrammarRuntime, TerminalKind};
use crate::TerminalId;

/// A lexed terminal.
///
/// Equality (and therefore the longest-common-prefix comparison the driver
/// runs between calls) is defined over `(terminal, value)` only; `span` is
/// informational and does not affect it, so shifting trailing whitespace
/// before an otherwise-identical prefix still counts as a match.
#[derive(Clone, Debug)]
pub struct Token {
  pub terminal: TerminalId,
  pub value: String,
  pub span: Span,
  /// Width of a preceding `Layout` terminal's match (see
  /// [`TerminalKind::Layout`]), if one immediately preceded this token.
  pub ws: Option<u64>,
}

impl PartialEq for Token {
  fn eq(&self, other: &Self) -> bool {
    self.terminal == other.terminal && self.value == other.value
  }
}
impl Eq for Token {}

/// Result of a single lex pass over a buffer.
pub struct LexOutput {
  pub tokens: Vec<Token>,
  /// Final byte offset reached: the position right after the last *real*
  /// token, or the offset of the first unrecognized character if lexing
  /// stopped early. A buffer ending in significant-only trailing
  /// skip/layout text (e.g. whitespace with nothing after it) does *not*
  /// advance this past the last real token — see `classify_remainder`.
  pub lexer_pos: usize,
}

/// Greedily lex `buffer` against `rt`'s terminal alphabet.
///
/// Longest match wins among all terminals matching at the current offset;
/// ties are broken by declaration order (earlier terminal wins), mirroring
/// `logos`' maximal-munch-then-priority rule, just evaluated at runtime
/// against data-driven patterns instead of a compile-time token enum.
pub fn lex(rt: &GrammarRuntime, buffer: &str) -> LexOutput {
  let mut tokens = Vec::new();
  let mut pos = 0usize;
  let mut pending_ws: Option<u64> = None;
  // Offset right after the last *real* token emitted. Trailing skip/layout
  // matches with nothing real after them don't count as "consumed" for
  // remainder classification (session::classify_remainder) — only a real
  // token closes off the buffer up to that point.
  let mut real_end = 0usize;
  let mut stopped = false;

  'outer: while pos < buffer.len() {
    let rest = &buffer[pos..];
    let mut best: Option<(usize, usize)> = None; // (len, terminal index)

    for (idx, t) in rt.terminals.iter().enumerate() {
      let len = match (&t.literal, &t.regex) {
        (Some(lit), _) => {
          if rest.starts_with(lit.as_str()) {
            Some(lit.len())
          } else {
            None
          }
        }
        (None, Some(re)) => re.find(rest).map(|m| m.end()),
        (None, None) => None,
      };
      if let Some(len) = len {
        if len == 0 {
          // zero-width matches never make progress; skip them rather than
          // looping forever.
          continue;
        }
        match best {
          Some((best_len, _)) if len <= best_len => {}
          _ => best = Some((len, idx)),
        }
      }
    }

    let Some((len, idx)) = best else {
      stopped = true;
      break 'outer;
    };

    let matched = &rest[..len];
    let term = &rt.terminals[idx];
    match term.kind {
      TerminalKind::Skip => {
        pos += len;
      }
      TerminalKind::Layout => {
        pending_ws = Some(measure_layout(matched));
        pos += len;
      }
      TerminalKind::Normal => {
        tokens.push(Token {
          terminal: TerminalId(idx as u32),
          value: matched.to_string(),
          span: Span { start: pos, end: pos + len },
          ws: pending_ws.take(),
        });
        pos += len;
        real_end = pos;
      }
    }
  }

  let lexer_pos = if stopped { pos } else { real_end };

  LexOutput { tokens, lexer_pos }
}

/// Width of the indentation following the last newline in a `Layout` match,
/// e.g. `"\n\n   "` measures to `3`.
fn measure_layout(matched: &str) -> u64 {
  let after_last_newline = matched.rfind('\n').map(|i| i + 1).unwrap_or(0);
  (matched.len() - after_last_newline) as u64
}

#[cfg(test)]
mod tests;
