//! The interactive LR parser: a state machine fed one terminal at a time.
//!
//! This is the "closed interface" the design notes call for (§4.2 /
//! design note 1): four operations (`feed`, `accepts`, `clone_state`,
//! `restore_state`), with the canonical-LR(1) table walk kept entirely
//! behind them. Swapping in a different table-driven core (a real LALR
//! merge, a generated parser) only touches this module.

use std::collections::BTreeSet;
use std::fmt;

use crate::grammar::{GrammarRuntime, TerminalId};
use crate::tables::Action;

/// Opaque, clonable snapshot of the LR stack.
///
/// Cloning is independent: feeding the clone never affects the original,
/// and vice versa (§3 invariant).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserState(Vec<usize>);

impl ParserState {
  fn initial() -> Self {
    ParserState(vec![0])
  }
}

/// Returned by [`InteractiveParser::feed`] when the grammar has no action
/// for the fed terminal in the current state. The parser's internal state
/// is left exactly as it was before the call (all-or-nothing).
#[derive(Clone, Copy, Debug)]
pub struct UnexpectedToken;

impl fmt::Display for UnexpectedToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "unexpected token")
  }
}
impl std::error::Error for UnexpectedToken {}

pub struct InteractiveParser<'g> {
  rt: &'g GrammarRuntime,
  state: ParserState,
}

impl<'g> InteractiveParser<'g> {
  pub fn new(rt: &'g GrammarRuntime) -> Self {
    Self {
      rt,
      state: ParserState::initial(),
    }
  }

  /// Advance by one terminal. All-or-nothing: on `Err`, `self` is
  /// unchanged.
  pub fn feed(&mut self, terminal: TerminalId) -> Result<(), UnexpectedToken> {
    let mut stack = self.state.0.clone();
    loop {
      let top = *stack.last().expect("parser stack is never empty");
      match self.rt.action(top, terminal).copied() {
        Some(Action::Shift(next)) => {
          stack.push(next);
          break;
        }
        Some(Action::Reduce(prod_idx)) => {
          let rhs_len = self.rt.productions[prod_idx].rhs.len();
          let keep = stack.len() - rhs_len;
          stack.truncate(keep);
          let under = *stack.last().expect("parser stack is never empty");
          let lhs = self.rt.productions[prod_idx].lhs;
          let goto = self
            .rt
            .goto(under, lhs)
            .expect("LR tables are consistent: every reduce has a goto");
          stack.push(goto);
        }
        Some(Action::Accept) => break,
        None => return Err(UnexpectedToken),
      }
    }
    self.state = ParserState(stack);
    Ok(())
  }

  /// Terminals legal as the next input in the current state. Does not
  /// mutate state, but is the most expensive operation in the core (it
  /// scans every action in the current state) — callers should call it at
  /// most once per fed token and cache the result, which is exactly what
  /// [`crate::snapshot::Snapshot`] does.
  pub fn accepts(&self) -> BTreeSet<TerminalId> {
    let top = *self.state.0.last().expect("parser stack is never empty");
    self
      .rt
      .tables
      .action
      .keys()
      .filter(|(state, _)| *state == top)
      .map(|(_, terminal)| *terminal)
      .collect()
  }

  pub fn clone_state(&self) -> ParserState {
    self.state.clone()
  }

  pub fn restore_state(&mut self, state: ParserState) {
    self.state = state;
  }
}
