use super::*;
use crate::fixtures::expr_grammar;

#[test]
fn compile_rejects_missing_start_symbol() {
  let mut def = GrammarDef::new();
  def.terminal("NAME", Pattern::Regex("[a-z]+".into()), TerminalKind::Normal);
  let err = GrammarRuntime::compile(def).unwrap_err();
  assert!(matches!(err, Error::GrammarLoadFailure(_)));
}

#[test]
fn compile_rejects_empty_terminal_alphabet() {
  let mut def = GrammarDef::new();
  let start = def.non_terminal("start");
  def.start(start);
  let err = GrammarRuntime::compile(def).unwrap_err();
  assert!(matches!(err, Error::GrammarLoadFailure(_)));
}

#[test]
fn compile_rejects_duplicate_terminal_names() {
  let mut def = GrammarDef::new();
  def.terminal("NAME", Pattern::Literal("a".into()), TerminalKind::Normal);
  def.terminal("NAME", Pattern::Literal("b".into()), TerminalKind::Normal);
  let start = def.non_terminal("start");
  def.start(start);
  def.production(start, vec![]);
  let err = GrammarRuntime::compile(def).unwrap_err();
  assert!(matches!(err, Error::GrammarLoadFailure(_)));
}

#[test]
fn compile_rejects_a_terminal_literally_named_end() {
  let mut def = GrammarDef::new();
  def.terminal("$END", Pattern::Literal("x".into()), TerminalKind::Normal);
  let start = def.non_terminal("start");
  def.start(start);
  def.production(start, vec![]);
  assert!(GrammarRuntime::compile(def).is_err());
}

#[test]
fn terminal_name_and_id_round_trip() {
  let fx = expr_grammar();
  assert_eq!(fx.rt.terminal_name(fx.name), "NAME");
  assert_eq!(fx.rt.terminal_id("NAME"), Some(fx.name));
  assert_eq!(fx.rt.terminal_id("NOPE"), None);
  assert_eq!(fx.rt.terminal_name(fx.rt.eof()), "$END");
}

#[test]
fn flavor_defaults_to_lalr() {
  let def = GrammarDef::new();
  assert_eq!(def.flavor, ParserFlavor::Lalr);
}
