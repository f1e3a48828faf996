//! Question and Choice HTTP Routes
//!
//! - `GET    /question/{question_id}` - fetch one question
//! - `GET    /choice/{question_id}`   - list a question's choices
//! - `POST   /question/`              - create a question with its choices
//! - `PUT    /question/{question_id}` - replace text and the whole choice set
//! - `DELETE /question/{question_id}` - remove a question and its choices
//!
//! Each handler receives its own [`Session`]. Writes commit once at the
//! end; an early return drops the session and rolls everything back.
//! Write handlers issue a write as their first statement, so the session
//! takes the write lock before it holds any read snapshot.

use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::observability::{Event, Logger};
use crate::store::{Choice, Question, Session, Store};

use super::errors::{ApiError, ApiResult};
use super::payload::{MessageResponse, QuestionPayload, ValidJson, ValidPath};

/// Confirmation detail returned by a successful update
pub const UPDATED_DETAIL: &str = "Question and associated choices updated successfully";

// ==================
// Shared State
// ==================

/// Question state shared across handlers
pub struct QuestionState {
    pub store: Store,
}

impl QuestionState {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

/// Acquire a session for the lifetime of the request
#[async_trait]
impl FromRequestParts<Arc<QuestionState>> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &Arc<QuestionState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(state.store.session().await?)
    }
}

// ==================
// Question Routes
// ==================

/// Create question routes
pub fn question_routes(state: Arc<QuestionState>) -> Router {
    Router::new()
        .route("/question/", post(create_question_handler))
        .route("/question", post(create_question_handler))
        .route(
            "/question/:question_id",
            get(get_question_handler)
                .put(update_question_handler)
                .delete(delete_question_handler),
        )
        .route("/choice/:question_id", get(get_choices_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn get_question_handler(
    ValidPath(question_id): ValidPath<i64>,
    mut session: Session,
) -> ApiResult<Json<Question>> {
    let question = session
        .find_question(question_id)
        .await?
        .ok_or(ApiError::QuestionNotFound)?;

    Ok(Json(question))
}

async fn get_choices_handler(
    ValidPath(question_id): ValidPath<i64>,
    mut session: Session,
) -> ApiResult<Json<Vec<Choice>>> {
    let choices = session.list_choices(question_id).await?;
    Ok(Json(choices))
}

async fn create_question_handler(
    mut session: Session,
    ValidJson(payload): ValidJson<QuestionPayload>,
) -> ApiResult<StatusCode> {
    let question_id = session.insert_question(&payload.question_text).await?;
    session
        .insert_choices(question_id, &payload.new_choices())
        .await?;
    session.commit().await?;

    Logger::event(
        Event::QuestionCreated,
        &[
            ("question_id", question_id.to_string().as_str()),
            ("choices", payload.choices.len().to_string().as_str()),
        ],
    );

    Ok(StatusCode::CREATED)
}

async fn update_question_handler(
    ValidPath(question_id): ValidPath<i64>,
    mut session: Session,
    ValidJson(payload): ValidJson<QuestionPayload>,
) -> ApiResult<Json<MessageResponse>> {
    if !session
        .set_question_text(question_id, &payload.question_text)
        .await?
    {
        return Err(ApiError::QuestionNotFound);
    }

    let removed = session.delete_choices(question_id).await?;
    session
        .insert_choices(question_id, &payload.new_choices())
        .await?;
    session.commit().await?;

    Logger::event(
        Event::QuestionUpdated,
        &[
            ("question_id", question_id.to_string().as_str()),
            ("choices_removed", removed.to_string().as_str()),
            ("choices_inserted", payload.choices.len().to_string().as_str()),
        ],
    );

    Ok(Json(MessageResponse::new(UPDATED_DETAIL)))
}

async fn delete_question_handler(
    ValidPath(question_id): ValidPath<i64>,
    mut session: Session,
) -> ApiResult<StatusCode> {
    let removed = session.delete_choices(question_id).await?;
    if !session.delete_question(question_id).await? {
        return Err(ApiError::QuestionNotFound);
    }
    session.commit().await?;

    Logger::event(
        Event::QuestionDeleted,
        &[
            ("question_id", question_id.to_string().as_str()),
            ("choices_removed", removed.to_string().as_str()),
        ],
    );

    Ok(StatusCode::OK)
}
