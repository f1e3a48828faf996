//! Per-request unit of database work
//!
//! A `Session` owns one pooled connection with an open transaction.
//! Statements issued through it become visible to other sessions only
//! after `commit()`. Dropping a session without committing rolls the
//! transaction back and returns the connection to the pool, so a failed
//! handler never leaves a half-applied write behind.

use sqlx::{Sqlite, SqlitePool, Transaction};

use super::errors::StoreResult;
use super::models::{Choice, NewChoice, Question};

/// Scoped database session
pub struct Session {
    tx: Transaction<'static, Sqlite>,
}

impl Session {
    pub(super) async fn begin(pool: &SqlitePool) -> StoreResult<Self> {
        let tx = pool.begin().await?;
        Ok(Self { tx })
    }

    /// Look up a question by id
    pub async fn find_question(&mut self, id: i64) -> StoreResult<Option<Question>> {
        let question = sqlx::query_as::<_, Question>(
            "SELECT id, question_text FROM questions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(question)
    }

    /// All choices referencing `question_id`, oldest first.
    ///
    /// The parent question is not checked; an unknown id yields an empty list.
    pub async fn list_choices(&mut self, question_id: i64) -> StoreResult<Vec<Choice>> {
        let choices = sqlx::query_as::<_, Choice>(
            "SELECT id, choice_text, is_correct, question_id FROM choices \
             WHERE question_id = ? ORDER BY id",
        )
        .bind(question_id)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(choices)
    }

    /// Insert a question and return its generated id
    pub async fn insert_question(&mut self, question_text: &str) -> StoreResult<i64> {
        let result = sqlx::query("INSERT INTO questions (question_text) VALUES (?)")
            .bind(question_text)
            .execute(&mut *self.tx)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Insert one choice row per entry, all referencing `question_id`
    pub async fn insert_choices(
        &mut self,
        question_id: i64,
        choices: &[NewChoice<'_>],
    ) -> StoreResult<()> {
        for choice in choices {
            sqlx::query(
                "INSERT INTO choices (choice_text, is_correct, question_id) VALUES (?, ?, ?)",
            )
            .bind(choice.choice_text)
            .bind(choice.is_correct)
            .bind(question_id)
            .execute(&mut *self.tx)
            .await?;
        }

        Ok(())
    }

    /// Overwrite a question's text. Returns false if no row matched.
    pub async fn set_question_text(&mut self, id: i64, question_text: &str) -> StoreResult<bool> {
        let result = sqlx::query("UPDATE questions SET question_text = ? WHERE id = ?")
            .bind(question_text)
            .bind(id)
            .execute(&mut *self.tx)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every choice of a question, returning how many went away
    pub async fn delete_choices(&mut self, question_id: i64) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM choices WHERE question_id = ?")
            .bind(question_id)
            .execute(&mut *self.tx)
            .await?;

        Ok(result.rows_affected())
    }

    /// Delete a question row. Returns false if no row matched.
    pub async fn delete_question(&mut self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Make every statement of this session durable
    pub async fn commit(self) -> StoreResult<()> {
        self.tx.commit().await?;
        Ok(())
    }

    /// Discard every statement of this session
    pub async fn rollback(self) -> StoreResult<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
