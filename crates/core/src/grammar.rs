//! In-memory grammar definitions and the compiled runtime derived from them.
//!
//! Loading a grammar from a grammar-description *file* (`.lark`-style text,
//! or anything else) is deliberately not this module's job: callers build a
//! [`GrammarDef`] however they like (by hand, or via their own text-format
//! loader) and hand it to [`GrammarRuntime::compile`].

use std::fmt;

use indexmap::IndexSet;
use regex::Regex;

use crate::tables::{build_tables, Action, Tables};
use crate::Error;

/// Stable integer id for a terminal, indexing into [`GrammarRuntime::terminal_names`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TerminalId(pub u32);

/// Stable integer id for a non-terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonTerminalId(pub u32);

/// A symbol on the right-hand side of a production.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
  Terminal(TerminalId),
  NonTerminal(NonTerminalId),
}

/// How a terminal's text is recognized.
#[derive(Clone, Debug)]
pub enum Pattern {
  /// Matches exactly this literal string.
  Literal(String),
  /// Matches the longest prefix satisfying this regex, anchored at the
  /// current offset.
  Regex(String),
}

/// How a matched terminal participates in the token stream handed to the
/// parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminalKind {
  /// Emitted as a normal `Token`.
  Normal,
  /// Matched and discarded (whitespace, comments).
  Skip,
  /// Matched and discarded like `Skip`, but its matched width (the column
  /// reached after the last newline in the match) is carried forward as
  /// `Token::ws` on the next `Normal` token. Used by the indenter.
  Layout,
}

/// One entry in the terminal alphabet.
#[derive(Clone, Debug)]
pub struct TerminalDef {
  pub name: String,
  pub pattern: Pattern,
  pub kind: TerminalKind,
}

/// One grammar production: `lhs -> rhs`.
#[derive(Clone, Debug)]
pub struct Production {
  pub lhs: NonTerminalId,
  pub rhs: Vec<Symbol>,
}

/// Which parser flavor a [`GrammarRuntime`] is compiled for.
///
/// Only `Lalr` exists today; the field exists so a caller's intent is
/// explicit and future flavors (e.g. `Earley` for ambiguous grammars) have
/// somewhere to go without changing `compile`'s signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParserFlavor {
  Lalr,
}

impl Default for ParserFlavor {
  fn default() -> Self {
    ParserFlavor::Lalr
  }
}

/// A grammar, not yet compiled into parse tables.
///
/// Terminal and non-terminal ids are assigned in declaration order as they
/// are added; the first declared non-terminal is not special, the start
/// symbol is set explicitly via [`GrammarDef::start`].
#[derive(Clone, Debug, Default)]
pub struct GrammarDef {
  pub terminals: Vec<TerminalDef>,
  pub non_terminal_names: Vec<String>,
  pub productions: Vec<Production>,
  pub start: Option<NonTerminalId>,
  pub flavor: ParserFlavor,
}

impl GrammarDef {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn terminal(&mut self, name: &str, pattern: Pattern, kind: TerminalKind) -> TerminalId {
    let id = TerminalId(self.terminals.len() as u32);
    self.terminals.push(TerminalDef {
      name: name.to_string(),
      pattern,
      kind,
    });
    id
  }

  pub fn non_terminal(&mut self, name: &str) -> NonTerminalId {
    let id = NonTerminalId(self.non_terminal_names.len() as u32);
    self.non_terminal_names.push(name.to_string());
    id
  }

  pub fn production(&mut self, lhs: NonTerminalId, rhs: Vec<Symbol>) {
    self.productions.push(Production { lhs, rhs });
  }

  pub fn start(&mut self, start: NonTerminalId) {
    self.start = Some(start);
  }
}

pub(crate) struct CompiledTerminal {
  pub name: String,
  pub kind: TerminalKind,
  pub literal: Option<String>,
  pub regex: Option<Regex>,
}

/// A grammar compiled into LR tables, ready to drive interactive parsing.
///
/// Immutable after construction, `Send + Sync`: a single runtime may be
/// shared (e.g. behind an `Arc`) across any number of independently-owned
/// [`crate::session::Session`]s.
pub struct GrammarRuntime {
  pub(crate) terminals: Vec<CompiledTerminal>,
  pub(crate) terminal_names: IndexSet<String>,
  pub(crate) non_terminal_names: Vec<String>,
  pub(crate) productions: Vec<Production>,
  pub(crate) start: NonTerminalId,
  pub(crate) tables: Tables,
  pub(crate) eof: TerminalId,
  pub(crate) flavor: ParserFlavor,
}

impl GrammarRuntime {
  pub fn compile(def: GrammarDef) -> Result<Self, Error> {
    let start = def
      .start
      .ok_or_else(|| Error::GrammarLoadFailure("grammar has no start symbol".into()))?;

    if def.terminals.is_empty() {
      return Err(Error::GrammarLoadFailure(
        "grammar declares no terminals".into(),
      ));
    }

    let mut terminal_names = IndexSet::new();
    let mut terminals = Vec::with_capacity(def.terminals.len());
    for t in &def.terminals {
      if !terminal_names.insert(t.name.clone()) {
        return Err(Error::GrammarLoadFailure(format!(
          "duplicate terminal name `{}`",
          t.name
        )));
      }
      let (literal, regex) = match &t.pattern {
        Pattern::Literal(s) => (Some(s.clone()), None),
        Pattern::Regex(pat) => {
          let anchored = format!("^(?:{pat})");
          let re = Regex::new(&anchored).map_err(|e| {
            Error::GrammarLoadFailure(format!("bad pattern for `{}`: {e}", t.name))
          })?;
          (None, Some(re))
        }
      };
      terminals.push(CompiledTerminal {
        name: t.name.clone(),
        kind: t.kind,
        literal,
        regex,
      });
    }

    // Synthetic end-of-input terminal, always appended last.
    let eof_name = "$END".to_string();
    if !terminal_names.insert(eof_name.clone()) {
      return Err(Error::GrammarLoadFailure(
        "grammar may not declare a terminal named `$END`".into(),
      ));
    }
    let eof = TerminalId((terminal_names.len() - 1) as u32);

    let tables = build_tables(&def, eof)
      .map_err(|e| Error::GrammarLoadFailure(format!("LR table construction failed: {e}")))?;

    Ok(GrammarRuntime {
      terminals,
      terminal_names,
      non_terminal_names: def.non_terminal_names,
      productions: def.productions,
      start,
      tables,
      eof,
      flavor: def.flavor,
    })
  }

  pub fn terminal_name(&self, id: TerminalId) -> &str {
    self.terminal_names.get_index(id.0 as usize).unwrap()
  }

  pub fn terminal_id(&self, name: &str) -> Option<TerminalId> {
    self
      .terminal_names
      .get_index_of(name)
      .map(|i| TerminalId(i as u32))
  }

  pub fn eof(&self) -> TerminalId {
    self.eof
  }

  pub fn flavor(&self) -> ParserFlavor {
    self.flavor
  }

  pub(crate) fn action(&self, state: usize, terminal: TerminalId) -> Option<&Action> {
    self.tables.action.get(&(state, terminal))
  }

  pub(crate) fn goto(&self, state: usize, nt: NonTerminalId) -> Option<usize> {
    self.tables.goto.get(&(state, nt)).copied()
  }
}

impl fmt::Debug for GrammarRuntime {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("GrammarRuntime")
      .field("terminals", &self.terminal_names.len())
      .field("states", &self.tables.state_count)
      .field("flavor", &self.flavor)
      .finish()
  }
}

#[cfg(test)]
mod tests;
