//! Request and response shapes, and the extractors that check them
//!
//! Incoming bodies and path segments are type-checked here, before any
//! handler logic runs. A mismatch becomes an `ApiError` with a 422 status
//! instead of axum's plain-text rejection.

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::store::NewChoice;

use super::errors::ApiError;

/// One answer option in a create/update payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoicePayload {
    pub choice_text: String,
    pub is_correct: bool,
}

/// Body of `POST /question/` and `PUT /question/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPayload {
    pub question_text: String,
    pub choices: Vec<ChoicePayload>,
}

impl QuestionPayload {
    /// Borrow the choice list as rows ready for insertion
    pub fn new_choices(&self) -> Vec<NewChoice<'_>> {
        self.choices
            .iter()
            .map(|choice| NewChoice {
                choice_text: &choice.choice_text,
                is_correct: choice.is_correct,
            })
            .collect()
    }
}

/// Confirmation body returned by update
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub detail: String,
}

impl MessageResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// JSON body extractor whose rejection is an `ApiError::InvalidBody`
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ValidJson(value)),
            Err(rejection) => Err(ApiError::InvalidBody(rejection.body_text())),
        }
    }
}

/// Path extractor whose rejection is an `ApiError::InvalidPath`
#[derive(Debug)]
pub struct ValidPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ValidPath(value)),
            Err(rejection) => Err(ApiError::InvalidPath(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_parses() {
        let payload: QuestionPayload = serde_json::from_value(json!({
            "question_text": "2+2?",
            "choices": [
                {"choice_text": "3", "is_correct": false},
                {"choice_text": "4", "is_correct": true}
            ]
        }))
        .unwrap();

        assert_eq!(payload.question_text, "2+2?");
        assert_eq!(payload.choices.len(), 2);
        assert!(payload.choices[1].is_correct);
    }

    #[test]
    fn test_empty_choice_list_is_allowed() {
        let payload: QuestionPayload =
            serde_json::from_value(json!({"question_text": "?", "choices": []})).unwrap();
        assert!(payload.new_choices().is_empty());
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        let result = serde_json::from_value::<QuestionPayload>(json!({
            "question_text": "2+2?",
            "choices": [{"choice_text": "4", "is_correct": "yes"}]
        }));
        assert!(result.is_err());

        let result = serde_json::from_value::<QuestionPayload>(json!({"question_text": "2+2?"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_new_choices_borrow_payload() {
        let payload = QuestionPayload {
            question_text: "Capital of France?".to_string(),
            choices: vec![ChoicePayload {
                choice_text: "Paris".to_string(),
                is_correct: true,
            }],
        };

        let rows = payload.new_choices();
        assert_eq!(
            rows,
            vec![NewChoice {
                choice_text: "Paris",
                is_correct: true
            }]
        );
    }
}
