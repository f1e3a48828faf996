//! quizdb - questions and multiple-choice answers over HTTP
//!
//! Questions and their choices live in SQLite and are served as JSON by
//! an Axum server. Every request runs inside its own database session so
//! multi-statement writes apply atomically.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod store;
