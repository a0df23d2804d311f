//! The incremental driver: reuses the longest matching token prefix,
//! advances the parser over the rest, and classifies the buffer's
//! remainder. This is `advance`, the one entry point the rest of the core
//! exists to support (§4.4).

use std::collections::BTreeSet;
use std::time::Instant;

use crate::grammar::{GrammarRuntime, TerminalId};
use crate::indent::{self, IndentConfig, IndentState, IndentStack};
use crate::lexer::{self, Token};
use crate::parser::InteractiveParser;
use crate::sink::{EventSink, NullSink};
use crate::snapshot::{Snapshot, SnapshotStore};

/// Classification of the buffer's trailing, not-yet-closed fragment.
/// Exactly one variant applies to any given `advance` call (§4.5, §8
/// invariant 5).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemainderState {
  /// The lexer consumed the whole buffer and the last token is closed —
  /// but may still be a prefix of a longer terminal (`"de"` vs. `"def"`).
  MaybeComplete,
  /// The lexer stopped short, and everything after that point is
  /// insignificant (e.g. just trailing whitespace).
  Complete,
  /// The lexer stopped short, and there is a non-whitespace fragment the
  /// caller still needs more characters to resolve into a token.
  Incomplete,
}

/// The return value of every [`Session::advance`] call.
#[derive(Clone, Debug)]
pub struct ParseResult {
  pub cur_ac_terminals: BTreeSet<TerminalId>,
  pub next_ac_terminals: BTreeSet<TerminalId>,
  pub remainder_state: RemainderState,
  pub remainder_string: String,
  /// For indentation-sensitive grammars: the indent-stack column widths
  /// currently open (i.e. the columns a DEDENT could legally target),
  /// innermost last. `None` when no indenter is configured.
  pub next_ac_indents: Option<Vec<u64>>,
}

/// Per-session state: the previous token list, the snapshot map, and the
/// cursor into both. Created once per grammar load; mutated only by
/// [`Session::advance`]. Not `Sync` — drive one session from one thread
/// (§5).
pub struct Session<'g> {
  rt: &'g GrammarRuntime,
  indent_cfg: Option<IndentConfig>,
  previous_tokens: Vec<Token>,
  snapshots: SnapshotStore,
  cur_pos: usize,
  lexer_pos: usize,
  parser_token_seq: Vec<Token>,
  cur_ac_terminals: BTreeSet<TerminalId>,
  next_ac_terminals: BTreeSet<TerminalId>,
  indent_state: IndentState,
  sink: Box<dyn EventSink>,
}

impl<'g> Session<'g> {
  pub fn new(rt: &'g GrammarRuntime, indent_cfg: Option<IndentConfig>) -> Self {
    let initial_accepts = InteractiveParser::new(rt).accepts();
    Self {
      rt,
      indent_cfg,
      previous_tokens: Vec::new(),
      snapshots: SnapshotStore::new(),
      cur_pos: 0,
      lexer_pos: 0,
      parser_token_seq: Vec::new(),
      cur_ac_terminals: BTreeSet::new(),
      next_ac_terminals: initial_accepts,
      indent_state: IndentState {
        stack: IndentStack::new(),
        queue: Default::default(),
      },
      sink: Box::new(NullSink),
    }
  }

  pub fn with_sink(mut self, sink: Box<dyn EventSink>) -> Self {
    self.sink = sink;
    self
  }

  pub fn advance(&mut self, buffer: &str) -> ParseResult {
    let lex_start = Instant::now();
    let raw = lexer::lex(self.rt, buffer);
    self.lexer_pos = raw.lexer_pos;
    self.sink.record("lex", lex_start.elapsed().as_secs_f64());

    let (tokens, indent_states): (Vec<Token>, Vec<IndentState>) = match &self.indent_cfg {
      Some(cfg) => indent::apply(raw.tokens, cfg, raw.lexer_pos),
      None => {
        let len = raw.tokens.len();
        (raw.tokens, vec![IndentState { stack: IndentStack::new(), queue: Default::default() }; len])
      }
    };

    if tokens.is_empty() {
      self.previous_tokens = Vec::new();
      self.snapshots = SnapshotStore::new();
      self.cur_pos = 0;
      self.parser_token_seq = Vec::new();
      self.cur_ac_terminals = BTreeSet::new();
      self.next_ac_terminals = InteractiveParser::new(self.rt).accepts();
      self.indent_state = IndentState {
        stack: IndentStack::new(),
        queue: Default::default(),
      };
      return ParseResult {
        cur_ac_terminals: self.cur_ac_terminals.clone(),
        next_ac_terminals: self.next_ac_terminals.clone(),
        remainder_state: RemainderState::Complete,
        remainder_string: String::new(),
        next_ac_indents: self.indent_cfg.as_ref().map(|_| self.indent_state.stack.levels().to_vec()),
      };
    }

    let common_len = longest_common_prefix(&self.previous_tokens, &tokens);
    let limit = common_len.min(self.previous_tokens.len());

    let mut parser = InteractiveParser::new(self.rt);
    match self.snapshots.nearest_below(limit) {
      Some(j) => {
        let restore_start = Instant::now();
        let snap = self.snapshots.get(j).expect("nearest_below returned a stored index");
        parser.restore_state(snap.parser_state.clone());
        self.cur_ac_terminals = snap.cur_ac_terminals.clone();
        self.next_ac_terminals = snap.next_ac_terminals.clone();
        if let Some(indent) = &snap.indent {
          self.indent_state = indent.clone();
        }
        self.cur_pos = j + 1;
        self
          .sink
          .record("restore", restore_start.elapsed().as_secs_f64());
      }
      None => {
        self.cur_pos = 0;
        self.cur_ac_terminals = BTreeSet::new();
        self.next_ac_terminals = parser.accepts();
        self.indent_state = IndentState {
          stack: IndentStack::new(),
          queue: Default::default(),
        };
      }
    }

    let parse_start = Instant::now();
    let mut i = self.cur_pos;
    while i < tokens.len() {
      match parser.feed(tokens[i].terminal) {
        Ok(()) => {
          self.parser_token_seq.push(tokens[i].clone());

          let accepts_start = Instant::now();
          let accepts = parser.accepts();
          self
            .sink
            .record("accepts", accepts_start.elapsed().as_secs_f64());

          let store_start = Instant::now();
          let snapshot = Snapshot {
            parser_state: parser.clone_state(),
            cur_ac_terminals: self.next_ac_terminals.clone(),
            next_ac_terminals: accepts.clone(),
            indent: indent_states.get(i).cloned(),
          };
          self.snapshots.insert(i, snapshot);
          self.cur_ac_terminals = self.next_ac_terminals.clone();
          self.next_ac_terminals = accepts;
          if let Some(indent) = indent_states.get(i) {
            self.indent_state = indent.clone();
          }
          self
            .sink
            .record("store", store_start.elapsed().as_secs_f64());

          i += 1;
        }
        Err(_unexpected) => break,
      }
    }
    self.cur_pos = i;
    self
      .sink
      .record("parse", parse_start.elapsed().as_secs_f64());

    let (remainder_state, remainder_string) = self.classify_remainder(buffer, &tokens);
    self.previous_tokens = tokens;

    ParseResult {
      cur_ac_terminals: self.cur_ac_terminals.clone(),
      next_ac_terminals: self.next_ac_terminals.clone(),
      remainder_state,
      remainder_string,
      next_ac_indents: self
        .indent_cfg
        .as_ref()
        .map(|_| self.indent_state.stack.levels().to_vec()),
    }
  }

  /// Implements §4.5. `tokens` is the full list the lexer produced for this
  /// call (not `self.parser_token_seq`, which may lag behind on a
  /// `ParseStop` — remainder classification is a lexing concept).
  fn classify_remainder(&self, buffer: &str, tokens: &[Token]) -> (RemainderState, String) {
    if self.lexer_pos < buffer.len() {
      let trimmed = buffer[self.lexer_pos..].trim_start_matches(' ');
      if trimmed.is_empty() {
        (RemainderState::Complete, String::new())
      } else {
        (RemainderState::Incomplete, trimmed.to_string())
      }
    } else {
      match tokens.last() {
        None => (RemainderState::Complete, String::new()),
        Some(tok) => {
          // A fixed (literal-pattern) terminal can't be extended into a
          // longer match of *itself* by appending more characters — but it
          // can still be shadowed by another terminal whose pattern also
          // matches this exact text (a keyword/identifier collision, e.g.
          // `IF = "if"` vs. `NAME = [a-z]+`: "if" closes the IF token, but
          // appending more letters turns the same span into a longer NAME
          // match instead). Only report Complete when no other terminal in
          // the alphabet could also match this token's text exactly.
          let this_idx = tok.terminal.0 as usize;
          let is_fixed = self.rt.terminals[this_idx].literal.is_some();
          if is_fixed && !other_terminal_matches_exactly(self.rt, this_idx, &tok.value) {
            (RemainderState::Complete, String::new())
          } else {
            (RemainderState::MaybeComplete, tok.value.clone())
          }
        }
      }
    }
  }
}

/// True if some terminal other than `exclude_idx` could also match `value`
/// exactly — a literal pattern equal to `value`, or a regex pattern whose
/// match at offset 0 runs the full length of `value`. Used to decide
/// whether a trailing literal-pattern token is genuinely closed, or only
/// closed-so-far because another, possibly extensible, terminal ties it at
/// this exact length.
fn other_terminal_matches_exactly(rt: &GrammarRuntime, exclude_idx: usize, value: &str) -> bool {
  rt.terminals.iter().enumerate().any(|(idx, t)| {
    if idx == exclude_idx {
      return false;
    }
    match (&t.literal, &t.regex) {
      (Some(lit), _) => lit == value,
      (None, Some(re)) => re.find(value).map(|m| m.end() == value.len()).unwrap_or(false),
      (None, None) => false,
    }
  })
}

/// Length of the shared prefix of `a` and `b` under `Token` equality
/// (terminal + value; offsets don't count — §4.4 tie-break note).
fn longest_common_prefix(a: &[Token], b: &[Token]) -> usize {
  a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}
