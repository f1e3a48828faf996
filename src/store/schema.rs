//! Table definitions, created on startup when absent

use sqlx::SqlitePool;

use super::errors::{StoreError, StoreResult};

/// DDL statements in dependency order.
///
/// `AUTOINCREMENT` keeps ids of deleted rows from being handed out again.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS questions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        question_text TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS choices (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        choice_text TEXT NOT NULL,
        is_correct BOOLEAN NOT NULL,
        question_id INTEGER NOT NULL REFERENCES questions(id) ON DELETE CASCADE
    )",
    "CREATE INDEX IF NOT EXISTS idx_choices_question_id ON choices(question_id)",
];

/// Create both tables and the choice index if they do not exist yet
pub async fn create_all(pool: &SqlitePool) -> StoreResult<()> {
    let mut tx = pool.begin().await.map_err(StoreError::Schema)?;

    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::Schema)?;
    }

    tx.commit().await.map_err(StoreError::Schema)
}

/// Names of the tables managed by this module
pub fn table_names() -> [&'static str; 2] {
    ["questions", "choices"]
}
