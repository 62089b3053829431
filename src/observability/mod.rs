//! Observability for roster
//!
//! Structured JSON logging of typed lifecycle events.
//!
//! # Principles
//!
//! 1. Logging is read-only: it never changes what an operation returns
//! 2. No background threads, no buffering
//! 3. Deterministic output (sorted fields)
//! 4. Hot paths do not log
//!
//! # Usage
//!
//! ```ignore
//! use roster::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::IndexBuilt, &[("nodes", "42".to_string())]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event at its own severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, String)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
