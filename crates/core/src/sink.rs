//! Optional timing observability. Absence of a sink means silent
//! operation, matching the source's split between a real `Logger` and a
//! silent `TestLogger`.

/// Receives named timing events (`lex`, `parse`, `store`, `restore`,
/// `accepts`) as they happen. Never called more than once per event per
/// `advance` call for `lex`/`parse`, but `store`/`restore`/`accepts` may
/// fire once per token processed.
pub trait EventSink {
  fn record(&self, event: &str, seconds: f64);
}

/// Default sink: does nothing.
pub struct NullSink;

impl EventSink for NullSink {
  fn record(&self, _event: &str, _seconds: f64) {}
}

/// Logs every event to stderr with its duration, for local debugging.
pub struct StderrSink;

impl EventSink for StderrSink {
  fn record(&self, event: &str, seconds: f64) {
    eprintln!("[increparse] {event}: {seconds:.6}s");
  }
}
