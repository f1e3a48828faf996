//! Row types for the `questions` and `choices` tables

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A quiz prompt
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question_text: String,
}

/// An answer option belonging to exactly one question
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Choice {
    pub id: i64,
    pub choice_text: String,
    pub is_correct: bool,
    pub question_id: i64,
}

/// A choice row about to be inserted; the id and parent are assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewChoice<'a> {
    pub choice_text: &'a str,
    pub is_correct: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_serialization() {
        let question = Question {
            id: 1,
            question_text: "2+2?".to_string(),
        };

        let json = serde_json::to_value(&question).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "question_text": "2+2?"}));
    }

    #[test]
    fn test_choice_serialization() {
        let choice = Choice {
            id: 7,
            choice_text: "4".to_string(),
            is_correct: true,
            question_id: 1,
        };

        let json = serde_json::to_value(&choice).unwrap();
        assert_eq!(json["is_correct"], true);
        assert_eq!(json["question_id"], 1);
    }
}
