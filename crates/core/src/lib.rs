//! An incremental, grammar-guided parser core.
//!
//! Given a growing prefix of source text, repeated calls to
//! [`Session::advance`] report which grammar terminals may legally appear
//! next, reusing as much of the previous call's parser work as the shared
//! token prefix allows. Grammar-file loading, a model/tokenizer evaluation
//! harness, and dataset I/O all live outside this crate — it consumes only
//! a compiled [`GrammarRuntime`] and a string buffer.

pub mod diagnostics;
pub mod error;
pub mod grammar;
pub mod indent;
pub mod lexer;
pub mod parser;
pub mod session;
pub mod sink;
pub mod snapshot;
mod tables;

#[cfg(test)]
mod fixtures;

pub use diagnostics::remainder_report;
pub use error::Error;
pub use grammar::{
  GrammarDef, GrammarRuntime, NonTerminalId, Pattern, ParserFlavor, Production, Symbol,
  TerminalDef, TerminalId, TerminalKind,
};
pub use indent::{DedentQueue, IndentConfig, IndentStack, IndentState};
pub use lexer::Token;
pub use parser::{InteractiveParser, ParserState, UnexpectedToken};
pub use session::{ParseResult, RemainderState, Session};
pub use sink::{EventSink, NullSink, StderrSink};
pub use snapshot::{Snapshot, SnapshotStore};

pub type Result<T, E = Error> = std::result::Result<T, E>;
