//! Relational store for questions and choices
//!
//! Backed by SQLite through an `sqlx` connection pool. All reads and
//! writes go through a [`Session`], one per request, which wraps a single
//! transaction: multi-statement operations either land completely or not
//! at all.
//!
//! # Tables
//!
//! - `questions(id, question_text)`
//! - `choices(id, choice_text, is_correct, question_id -> questions.id)`

mod errors;
mod models;
mod pool;
mod schema;
mod session;

pub use errors::{StoreError, StoreResult};
pub use models::{Choice, NewChoice, Question};
pub use pool::{Store, StoreConfig};
pub use schema::table_names;
pub use session::Session;
