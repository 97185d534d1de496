//! Observability subsystem
//!
//! Provides structured, tagged logging for remote history fetches.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on control flow
//! 3. Sinks are injected, never global
//!
//! # Usage
//!
//! ```ignore
//! use remote_history_fetcher::observability::{Event, Logger};
//!
//! let logger = Logger::tracing().with("run_id", run_id);
//! logger.error(Event::HistoryFetchFailed, &[("error", "unavailable")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{JsonSink, LogEntry, LogSink, Logger, MemorySink, Severity, TracingSink};
