//! # quizdb HTTP Server Module
//!
//! Axum server exposing questions and their choices as JSON.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/question/*` - Question create, read, replace, delete
//! - `/choice/{question_id}` - Choices of a question

pub mod access_log;
pub mod config;
pub mod errors;
pub mod health_routes;
pub mod payload;
pub mod question_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use payload::{ChoicePayload, MessageResponse, QuestionPayload};
pub use question_routes::UPDATED_DETAIL;
pub use server::HttpServer;
