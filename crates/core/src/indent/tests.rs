use super::*;
use crate::lexer::Token;

const INDENT: TerminalId = TerminalId(100);
const DEDENT: TerminalId = TerminalId(101);
const NAME: TerminalId = TerminalId(1);

fn cfg() -> IndentConfig {
  IndentConfig {
    indent_terminal: INDENT,
    dedent_terminal: DEDENT,
  }
}

fn name_tok(value: &str, pos: usize, ws: Option<u64>) -> Token {
  Token {
    terminal: NAME,
    value: value.into(),
    span: (pos..pos + value.len()).into(),
    ws,
  }
}

#[test]
fn flat_line_emits_no_synthetic_tokens() {
  let raw = vec![name_tok("a", 0, Some(0)), name_tok("b", 2, Some(0))];
  let (tokens, states) = apply(raw, &cfg(), 3);
  assert_eq!(tokens.len(), 2);
  assert!(tokens.iter().all(|t| t.terminal == NAME));
  assert_eq!(states.last().unwrap().stack.level(), 0);
}

#[test]
fn deeper_column_emits_indent() {
  let raw = vec![name_tok("a", 0, Some(0)), name_tok("b", 2, Some(4))];
  let (tokens, states) = apply(raw, &cfg(), 6);
  let kinds: Vec<TerminalId> = tokens.iter().map(|t| t.terminal).collect();
  // trailing DEDENT is the unwind-at-eof unwind of the still-open level 4
  assert_eq!(kinds, vec![NAME, INDENT, NAME, DEDENT]);
  assert_eq!(states[1].stack.levels(), &[0, 4]);
}

#[test]
fn shallower_column_emits_one_dedent_per_level() {
  let raw = vec![
    name_tok("a", 0, Some(0)),
    name_tok("b", 2, Some(4)),
    name_tok("c", 8, Some(8)),
    name_tok("d", 12, Some(0)),
  ];
  let (tokens, states) = apply(raw, &cfg(), 14);
  let kinds: Vec<TerminalId> = tokens.iter().map(|t| t.terminal).collect();
  // a, INDENT, b, INDENT, c, DEDENT, DEDENT, d
  assert_eq!(
    kinds,
    vec![NAME, INDENT, NAME, INDENT, NAME, DEDENT, DEDENT, NAME]
  );
  assert_eq!(states.last().unwrap().stack.levels(), &[0]);
}

#[test]
fn unwinds_open_levels_at_eof() {
  let raw = vec![name_tok("a", 0, Some(0)), name_tok("b", 2, Some(4))];
  let (tokens, _states) = apply(raw, &cfg(), 6);
  let kinds: Vec<TerminalId> = tokens.iter().map(|t| t.terminal).collect();
  assert_eq!(kinds, vec![NAME, INDENT, NAME, DEDENT]);
}

#[test]
fn mid_dedent_snapshot_shows_partially_drained_queue() {
  let raw = vec![
    name_tok("a", 0, Some(0)),
    name_tok("b", 2, Some(4)),
    name_tok("c", 8, Some(8)),
    name_tok("d", 12, Some(0)),
  ];
  let (_tokens, states) = apply(raw, &cfg(), 14);
  // The stack pops all the way down to the target column before any DEDENT
  // token is emitted; the queue is what drains one entry per token.
  // states: [a, INDENT, b, INDENT, c, DEDENT(queue=[4]), DEDENT(queue=[]), d]
  let after_first_dedent = &states[5];
  assert_eq!(after_first_dedent.stack.levels(), &[0]);
  assert_eq!(after_first_dedent.queue.len(), 1);
  assert_eq!(states[6].queue.len(), 0);
}
