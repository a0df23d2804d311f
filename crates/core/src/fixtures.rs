//! Small grammars shared by the test modules in this crate. Not part of the
//! public API; only compiled under `#[cfg(test)]`.

use crate::grammar::{GrammarDef, Pattern, Symbol, TerminalKind};
use crate::{GrammarRuntime, NonTerminalId, TerminalId};

/// `start: NAME ("+" NAME)*`, whitespace-skipping. The running example used
/// throughout the design doc's worked scenarios.
pub struct ExprFixture {
  pub rt: GrammarRuntime,
  pub name: TerminalId,
  pub plus: TerminalId,
}

pub fn expr_grammar() -> ExprFixture {
  let mut def = GrammarDef::new();
  let name = def.terminal("NAME", Pattern::Regex("[a-z]+".into()), TerminalKind::Normal);
  let plus = def.terminal("PLUS", Pattern::Literal("+".into()), TerminalKind::Normal);
  def.terminal("WS", Pattern::Regex(r"[ \t\n]+".into()), TerminalKind::Skip);

  let start_nt = def.non_terminal("start");
  let tail_nt = def.non_terminal("tail");
  def.start(start_nt);

  def.production(start_nt, vec![Symbol::Terminal(name), Symbol::NonTerminal(tail_nt)]);
  def.production(
    tail_nt,
    vec![Symbol::Terminal(plus), Symbol::Terminal(name), Symbol::NonTerminal(tail_nt)],
  );
  def.production(tail_nt, vec![]);

  let rt = GrammarRuntime::compile(def).expect("fixture grammar compiles");
  ExprFixture { rt, name, plus }
}

/// A block grammar with an INDENT/DEDENT-sensitive suite:
/// `start: "if" NAME ":" INDENT stmt DEDENT`, `stmt: NAME`.
///
/// There's no explicit NEWLINE terminal: the newline and the indentation
/// that follows it are a single `Layout` match, and its width rides along
/// on `Token::ws` to whatever real token comes after it — see
/// [`crate::indent`]. Exercises indentation end to end.
pub struct BlockFixture {
  pub rt: GrammarRuntime,
  pub indent_cfg: crate::IndentConfig,
}

pub fn block_grammar() -> BlockFixture {
  let mut def = GrammarDef::new();
  let if_kw = def.terminal("IF", Pattern::Literal("if".into()), TerminalKind::Normal);
  let name = def.terminal("NAME", Pattern::Regex("[a-z]+".into()), TerminalKind::Normal);
  let colon = def.terminal("COLON", Pattern::Literal(":".into()), TerminalKind::Normal);
  let indent = def.terminal("INDENT", Pattern::Literal("\0INDENT".into()), TerminalKind::Normal);
  let dedent = def.terminal("DEDENT", Pattern::Literal("\0DEDENT".into()), TerminalKind::Normal);
  def.terminal(
    "LAYOUT",
    Pattern::Regex(r"[ \t]*\n[ \t]*".into()),
    TerminalKind::Layout,
  );
  def.terminal("SP", Pattern::Regex(r"[ \t]+".into()), TerminalKind::Skip);

  let start_nt = def.non_terminal("start");
  let stmt_nt = def.non_terminal("stmt");
  def.start(start_nt);

  def.production(
    start_nt,
    vec![
      Symbol::Terminal(if_kw),
      Symbol::Terminal(name),
      Symbol::Terminal(colon),
      Symbol::Terminal(indent),
      Symbol::NonTerminal(stmt_nt),
      Symbol::Terminal(dedent),
    ],
  );
  def.production(stmt_nt, vec![Symbol::Terminal(name)]);

  let rt = GrammarRuntime::compile(def).expect("fixture grammar compiles");
  BlockFixture {
    rt,
    indent_cfg: crate::IndentConfig {
      indent_terminal: indent,
      dedent_terminal: dedent,
    },
  }
}

#[allow(dead_code)]
pub fn non_terminal(id: u32) -> NonTerminalId {
  NonTerminalId(id)
}
