//! Observable events
//!
//! Events are explicit and typed; each carries its own severity.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Table definitions loaded from a file
    TablesLoaded,
    /// A validation model was built and cached
    ModelCreated,
    /// A record failed model validation
    RecordRejected,
    /// A CLI command failed
    CommandFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::TablesLoaded => "TABLES_LOADED",
            Event::ModelCreated => "MODEL_CREATED",
            Event::RecordRejected => "RECORD_REJECTED",
            Event::CommandFailed => "COMMAND_FAILED",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Event::ModelCreated => Severity::Trace,
            Event::TablesLoaded => Severity::Info,
            Event::RecordRejected => Severity::Warn,
            Event::CommandFailed => Severity::Error,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::ModelCreated.as_str(), "MODEL_CREATED");
        assert_eq!(Event::TablesLoaded.to_string(), "TABLES_LOADED");
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::ModelCreated.severity(), Severity::Trace);
        assert_eq!(Event::CommandFailed.severity(), Severity::Error);
    }
}
