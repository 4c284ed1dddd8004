//! Observability for tablemodel
//!
//! Structured JSON logging with typed lifecycle events.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on execution
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use tablemodel::observability::{log_event_with_fields, Event, Logger, Severity};
//!
//! Logger::log(Severity::Info, "TABLES_LOADED", &[("count", "2")]);
//! log_event_with_fields(Event::ModelCreated, &[("model", "Movie")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{threshold, Logger, Severity, LOG_LEVEL_ENV};

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event_with_fields() {
        // This just verifies no panic
        log_event_with_fields(Event::ModelCreated, &[("model", "Movie"), ("fields", "3")]);
    }
}
