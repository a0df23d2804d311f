//! The snapshot store: write-through after every successful feed, keyed by
//! the zero-based index of the last token fed. No eviction — see the
//! design doc's §5 memory note for why that's the caller's problem, not
//! this crate's.

use std::collections::{BTreeSet, HashMap};

use crate::grammar::TerminalId;
use crate::indent::IndentState;
use crate::parser::ParserState;

#[derive(Clone, Debug)]
pub struct Snapshot {
  pub parser_state: ParserState,
  pub cur_ac_terminals: BTreeSet<TerminalId>,
  pub next_ac_terminals: BTreeSet<TerminalId>,
  pub indent: Option<IndentState>,
}

#[derive(Default)]
pub struct SnapshotStore {
  by_index: HashMap<usize, Snapshot>,
}

impl SnapshotStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, index: usize) -> Option<&Snapshot> {
    self.by_index.get(&index)
  }

  pub fn insert(&mut self, index: usize, snapshot: Snapshot) {
    self.by_index.insert(index, snapshot);
  }

  /// Largest index `< limit` that has a stored snapshot, if any. Used to
  /// find the nearest reusable state after computing the longest common
  /// token prefix (§4.4 step 3).
  pub fn nearest_below(&self, limit: usize) -> Option<usize> {
    (0..limit).rev().find(|i| self.by_index.contains_key(i))
  }
}
