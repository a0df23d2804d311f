use parser::{GrammarRuntime, ParseResult, Session};
use rustyline::error::ReadlineError;
use rustyline::Editor;

use crate::demo_grammar;

/// Reads lines, appends each to a running buffer, and after every line
/// prints the terminals the parser would still accept next — a one-line
/// stand-in for what a constrained decoder checks after every token.
pub fn run() -> anyhow::Result<()> {
  let rt = demo_grammar::build();
  let mut session = Session::new(&rt, None);
  let mut buffer = String::new();

  let mut rl = Editor::<()>::new()?;
  println!("increparse repl - grammar: start: NAME (\"+\" NAME)*");
  println!("type a prefix one line at a time, Ctrl-D to quit");
  loop {
    match rl.readline(">> ") {
      Ok(line) => {
        rl.add_history_entry(line.as_str());
        if !buffer.is_empty() {
          buffer.push('\n');
        }
        buffer.push_str(&line);
        let result = session.advance(&buffer);
        print_result(&rt, &result);
      }
      Err(ReadlineError::Interrupted) => continue,
      Err(ReadlineError::Eof) => break,
      Err(e) => return Err(e.into()),
    }
  }
  Ok(())
}

fn print_result(rt: &GrammarRuntime, result: &ParseResult) {
  let mut names: Vec<&str> = result
    .next_ac_terminals
    .iter()
    .map(|t| rt.terminal_name(*t))
    .collect();
  names.sort_unstable();
  println!(
    "  remainder: {:?} ({:?})",
    result.remainder_string, result.remainder_state
  );
  println!("  next:      {names:?}");
}
