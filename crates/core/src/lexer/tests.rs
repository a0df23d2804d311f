use super::*;
use crate::fixtures::expr_grammar;

#[test]
fn lexes_skipping_whitespace() {
  let fx = expr_grammar();
  let out = lex(&fx.rt, "a + b");
  let values: Vec<&str> = out.tokens.iter().map(|t| t.value.as_str()).collect();
  assert_eq!(values, vec!["a", "+", "b"]);
  assert_eq!(out.lexer_pos, 5);
}

#[test]
fn trailing_whitespace_does_not_advance_past_last_real_token() {
  let fx = expr_grammar();
  let out = lex(&fx.rt, "a ");
  assert_eq!(out.tokens.len(), 1);
  assert_eq!(out.tokens[0].value, "a");
  // lexer_pos stops right after "a", not at the buffer's end.
  assert_eq!(out.lexer_pos, 1);
}

#[test]
fn stops_cleanly_at_first_unrecognized_character() {
  let fx = expr_grammar();
  let out = lex(&fx.rt, "a + 1");
  let values: Vec<&str> = out.tokens.iter().map(|t| t.value.as_str()).collect();
  assert_eq!(values, vec!["a", "+"]);
  // stopped right before the digit, having consumed the space before it
  assert_eq!(out.lexer_pos, 4);
}

#[test]
fn token_equality_ignores_position() {
  let a = Token {
    terminal: TerminalId(0),
    value: "a".into(),
    span: (0..1).into(),
    ws: None,
  };
  let b = Token {
    terminal: TerminalId(0),
    value: "a".into(),
    span: (5..6).into(),
    ws: Some(2),
  };
  assert_eq!(a, b);
}

#[test]
fn empty_buffer_yields_no_tokens() {
  let fx = expr_grammar();
  let out = lex(&fx.rt, "");
  assert!(out.tokens.is_empty());
  assert_eq!(out.lexer_pos, 0);
}
