//! Observable events
//!
//! Events are explicit and typed; their string names are stable and
//! safe to match on in log pipelines.

use std::fmt;

use super::logger::Severity;

/// Observable events in quizdb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & lifecycle
    /// Startup begins
    BootStart,
    /// Startup complete, about to serve
    BootComplete,
    /// Startup aborted; the process exits
    BootFailed,
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Tables exist
    SchemaReady,
    /// Listening for requests
    Serving,
    /// Shutdown signal received
    ShutdownStart,
    /// Server stopped, pool closed
    ShutdownComplete,

    // Requests
    /// Request answered with a success status
    RequestComplete,
    /// Request answered with a client error
    RequestRejected,
    /// Request answered with a server error
    RequestFailed,

    // Question writes
    /// Question and its choices inserted
    QuestionCreated,
    /// Question text and choice set replaced
    QuestionUpdated,
    /// Question and its choices removed
    QuestionDeleted,

    // Store
    /// A store operation failed
    StoreFailure,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "QUIZDB_STARTUP_BEGIN",
            Event::BootComplete => "QUIZDB_STARTUP_COMPLETE",
            Event::BootFailed => "QUIZDB_STARTUP_FAILED",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaReady => "SCHEMA_READY",
            Event::Serving => "QUIZDB_SERVING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::RequestComplete => "REQUEST_COMPLETE",
            Event::RequestRejected => "REQUEST_REJECTED",
            Event::RequestFailed => "REQUEST_FAILED",

            Event::QuestionCreated => "QUESTION_CREATED",
            Event::QuestionUpdated => "QUESTION_UPDATED",
            Event::QuestionDeleted => "QUESTION_DELETED",

            Event::StoreFailure => "STORE_ERROR",
        }
    }

    /// Severity used when the event is logged without an override
    pub fn severity(&self) -> Severity {
        match self {
            Event::RequestRejected => Severity::Warn,
            Event::RequestFailed | Event::StoreFailure => Severity::Error,
            Event::BootFailed => Severity::Fatal,
            _ => Severity::Info,
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
    fn test_names_are_upper_snake() {
        let events = [
            Event::BootStart,
            Event::BootComplete,
            Event::BootFailed,
            Event::ConfigLoaded,
            Event::SchemaReady,
            Event::Serving,
            Event::ShutdownStart,
            Event::ShutdownComplete,
            Event::RequestComplete,
            Event::RequestRejected,
            Event::RequestFailed,
            Event::QuestionCreated,
            Event::QuestionUpdated,
            Event::QuestionDeleted,
            Event::StoreFailure,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_default_severity() {
        assert_eq!(Event::QuestionCreated.severity(), Severity::Info);
        assert_eq!(Event::RequestRejected.severity(), Severity::Warn);
        assert_eq!(Event::StoreFailure.severity(), Severity::Error);
        assert_eq!(Event::BootFailed.severity(), Severity::Fatal);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Event::Serving), "QUIZDB_SERVING");
    }
}
