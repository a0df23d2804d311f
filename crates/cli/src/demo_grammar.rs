//! A small built-in grammar (`start: NAME ("+" NAME)*`) for the `repl`
//! subcommand. A real embedder builds its own [`core::GrammarDef`]; this one
//! exists only so the CLI has something to drive without an external
//! grammar-file loader, which is out of scope for this crate.

use parser::{GrammarDef, GrammarRuntime, Pattern, Symbol, TerminalKind};

pub fn build() -> GrammarRuntime {
  let mut def = GrammarDef::new();
  let name = def.terminal("NAME", Pattern::Regex("[a-zA-Z_][a-zA-Z0-9_]*".into()), TerminalKind::Normal);
  let plus = def.terminal("PLUS", Pattern::Literal("+".into()), TerminalKind::Normal);
  def.terminal("WS", Pattern::Regex(r"[ \t\n]+".into()), TerminalKind::Skip);

  let start = def.non_terminal("start");
  let tail = def.non_terminal("tail");
  def.start(start);

  def.production(start, vec![Symbol::Terminal(name), Symbol::NonTerminal(tail)]);
  def.production(
    tail,
    vec![Symbol::Terminal(plus), Symbol::Terminal(name), Symbol::NonTerminal(tail)],
  );
  def.production(tail, vec![]);

  GrammarRuntime::compile(def).expect("built-in demo grammar always compiles")
}
