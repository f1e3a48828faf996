//! Observability for quizdb
//!
//! Structured JSON logging of lifecycle and request events.
//!
//! # Usage
//!
//! ```ignore
//! use quizdb::observability::{Event, Logger, ObservationScope};
//!
//! Logger::event(Event::QuestionCreated, &[("question_id", "42")]);
//!
//! let scope = ObservationScope::with_fields("SCHEMA", &[("database_url", url)]);
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::{ObservationScope, Timer};
