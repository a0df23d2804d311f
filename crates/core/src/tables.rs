//! Canonical LR(1) table construction.
//!
//! The public-facing flavor name is "lalr" (see [`crate::grammar::ParserFlavor`])
//! because that is the only flavor selector the core exposes, but the table
//! builder underneath constructs the canonical LR(1) automaton rather than
//! merging lookaheads into LALR(1) states. For the grammar sizes this core is
//! meant to drive (a handful of terminals and productions, not a full
//! general-purpose language grammar) the state count difference does not
//! matter, and the design notes explicitly allow "any table-driven or
//! generated LALR core".

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::grammar::{GrammarDef, NonTerminalId, Production, Symbol, TerminalId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
  Shift(usize),
  Reduce(usize),
  Accept,
}

#[derive(Debug, Default)]
pub struct Tables {
  pub action: HashMap<(usize, TerminalId), Action>,
  pub goto: HashMap<(usize, NonTerminalId), usize>,
  pub state_count: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
struct Item {
  prod: usize,
  dot: usize,
  lookahead: TerminalId,
}

pub fn build_tables(def: &GrammarDef, eof: TerminalId) -> Result<Tables, String> {
  let start = def
    .start
    .ok_or_else(|| "missing start symbol".to_string())?;

  let aug_lhs = NonTerminalId(def.non_terminal_names.len() as u32);
  let aug_prod_idx = def.productions.len();
  let mut productions = def.productions.clone();
  productions.push(Production {
    lhs: aug_lhs,
    rhs: vec![Symbol::NonTerminal(start)],
  });

  let mut by_lhs: HashMap<NonTerminalId, Vec<usize>> = HashMap::new();
  for (idx, p) in productions.iter().enumerate() {
    by_lhs.entry(p.lhs).or_default().push(idx);
  }

  let nullable = compute_nullable(&productions);
  let first = compute_first(&productions, &nullable);

  let first_of_seq = |symbols: &[Symbol], lookahead: TerminalId| -> HashSet<TerminalId> {
    let mut out = HashSet::new();
    for sym in symbols {
      match sym {
        Symbol::Terminal(t) => {
          out.insert(*t);
          return out;
        }
        Symbol::NonTerminal(nt) => {
          out.extend(first.get(nt).cloned().unwrap_or_default());
          if !nullable.contains(nt) {
            return out;
          }
        }
      }
    }
    out.insert(lookahead);
    out
  };

  let closure = |items: BTreeSet<Item>| -> BTreeSet<Item> {
    let mut set = items;
    loop {
      let mut additions = Vec::new();
      for item in &set {
        let rhs = &productions[item.prod].rhs;
        if item.dot >= rhs.len() {
          continue;
        }
        if let Symbol::NonTerminal(b) = rhs[item.dot] {
          let beta = &rhs[item.dot + 1..];
          let lookaheads = first_of_seq(beta, item.lookahead);
          if let Some(prods) = by_lhs.get(&b) {
            for &p in prods {
              for &la in &lookaheads {
                let candidate = Item {
                  prod: p,
                  dot: 0,
                  lookahead: la,
                };
                if !set.contains(&candidate) {
                  additions.push(candidate);
                }
              }
            }
          }
        }
      }
      if additions.is_empty() {
        break;
      }
      set.extend(additions);
    }
    set
  };

  let goto = |items: &BTreeSet<Item>, sym: Symbol| -> BTreeSet<Item> {
    let mut moved = BTreeSet::new();
    for item in items {
      let rhs = &productions[item.prod].rhs;
      if item.dot < rhs.len() && rhs[item.dot] == sym {
        moved.insert(Item {
          prod: item.prod,
          dot: item.dot + 1,
          lookahead: item.lookahead,
        });
      }
    }
    closure(moved)
  };

  let start_items: BTreeSet<Item> = closure(
    [Item {
      prod: aug_prod_idx,
      dot: 0,
      lookahead: eof,
    }]
    .into_iter()
    .collect(),
  );

  let mut states: Vec<BTreeSet<Item>> = vec![start_items.clone()];
  let mut state_index: HashMap<BTreeSet<Item>, usize> = HashMap::new();
  state_index.insert(start_items, 0);

  let mut transitions: HashMap<(usize, Symbol), usize> = HashMap::new();

  let mut frontier = vec![0usize];
  while let Some(s) = frontier.pop() {
    let mut symbols: BTreeSet<SymbolKey> = BTreeSet::new();
    for item in &states[s] {
      let rhs = &productions[item.prod].rhs;
      if item.dot < rhs.len() {
        symbols.insert(SymbolKey(rhs[item.dot]));
      }
    }
    for SymbolKey(sym) in symbols {
      let next_items = goto(&states[s], sym);
      if next_items.is_empty() {
        continue;
      }
      let next_state = if let Some(&id) = state_index.get(&next_items) {
        id
      } else {
        let id = states.len();
        state_index.insert(next_items.clone(), id);
        states.push(next_items);
        frontier.push(id);
        id
      };
      transitions.insert((s, sym), next_state);
    }
  }

  let mut action: HashMap<(usize, TerminalId), Action> = HashMap::new();
  let mut goto_table: HashMap<(usize, NonTerminalId), usize> = HashMap::new();

  for (&(s, sym), &target) in &transitions {
    match sym {
      Symbol::Terminal(t) => {
        set_action(&mut action, (s, t), Action::Shift(target))?;
      }
      Symbol::NonTerminal(nt) => {
        goto_table.insert((s, nt), target);
      }
    }
  }

  for (s, items) in states.iter().enumerate() {
    for item in items {
      let rhs = &productions[item.prod].rhs;
      if item.dot != rhs.len() {
        continue;
      }
      if item.prod == aug_prod_idx {
        set_action(&mut action, (s, item.lookahead), Action::Accept)?;
      } else {
        set_action(&mut action, (s, item.lookahead), Action::Reduce(item.prod))?;
      }
    }
  }

  Ok(Tables {
    action,
    goto: goto_table,
    state_count: states.len(),
  })
}

/// Conflict resolution: shift always wins over reduce (standard
/// yacc/bison-style preference); between two reduces, the earlier-declared
/// production wins; a later shift is never allowed to clobber an existing
/// one (the automaton is deterministic, so that would indicate a bug).
fn set_action(
  table: &mut HashMap<(usize, TerminalId), Action>,
  key: (usize, TerminalId),
  action: Action,
) -> Result<(), String> {
  match table.get(&key) {
    None => {
      table.insert(key, action);
    }
    Some(Action::Shift(_)) => {
      // shift/reduce conflict: keep the shift.
    }
    Some(Action::Reduce(existing)) => match action {
      Action::Shift(_) => {
        table.insert(key, action);
      }
      Action::Reduce(new) if new < *existing => {
        table.insert(key, action);
      }
      _ => {}
    },
    Some(Action::Accept) => {}
  }
  Ok(())
}

fn compute_nullable(productions: &[Production]) -> HashSet<NonTerminalId> {
  let mut nullable = HashSet::new();
  loop {
    let mut changed = false;
    for p in productions {
      if nullable.contains(&p.lhs) {
        continue;
      }
      let is_nullable = p.rhs.iter().all(|s| match s {
        Symbol::Terminal(_) => false,
        Symbol::NonTerminal(nt) => nullable.contains(nt),
      });
      if is_nullable {
        nullable.insert(p.lhs);
        changed = true;
      }
    }
    if !changed {
      break;
    }
  }
  nullable
}

fn compute_first(
  productions: &[Production],
  nullable: &HashSet<NonTerminalId>,
) -> HashMap<NonTerminalId, HashSet<TerminalId>> {
  let mut first: HashMap<NonTerminalId, HashSet<TerminalId>> = HashMap::new();
  loop {
    let mut changed = false;
    for p in productions {
      let mut acc: HashSet<TerminalId> = HashSet::new();
      for sym in &p.rhs {
        match sym {
          Symbol::Terminal(t) => {
            acc.insert(*t);
            break;
          }
          Symbol::NonTerminal(nt) => {
            acc.extend(first.get(nt).cloned().unwrap_or_default());
            if !nullable.contains(nt) {
              break;
            }
          }
        }
      }
      let entry = first.entry(p.lhs).or_default();
      let before = entry.len();
      entry.extend(acc);
      if entry.len() != before {
        changed = true;
      }
    }
    if !changed {
      break;
    }
  }
  first
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct SymbolKey(Symbol);

impl PartialOrd for Symbol {
  fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Symbol {
  fn cmp(&self, other: &Self) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (self, other) {
      (Symbol::Terminal(a), Symbol::Terminal(b)) => a.cmp(b),
      (Symbol::NonTerminal(a), Symbol::NonTerminal(b)) => a.cmp(b),
      (Symbol::Terminal(_), Symbol::NonTerminal(_)) => Ordering::Less,
      (Symbol::NonTerminal(_), Symbol::Terminal(_)) => Ordering::Greater,
    }
  }
}
