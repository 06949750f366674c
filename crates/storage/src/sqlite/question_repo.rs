use trivia_core::model::{CategoryScope, Question, QuestionId};

use super::SqliteRepository;
use super::mapping::{
    category_id_to_i64, category_key, db_err, map_question_row, question_id_from_i64,
    question_key,
};
use crate::repository::{NewQuestionRecord, QuestionRepository, StorageError};

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn list_questions(&self, scope: CategoryScope) -> Result<Vec<Question>, StorageError> {
        let category = match scope.category_id() {
            None => None,
            Some(id) => match category_key(id) {
                Some(key) => Some(key),
                None => return Ok(Vec::new()),
            },
        };

        let rows = sqlx::query(
            r"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE ?1 IS NULL OR category = ?1
            ORDER BY id ASC
            ",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let mut questions = Vec::with_capacity(rows.len());
        for row in rows {
            questions.push(map_question_row(&row)?);
        }
        Ok(questions)
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        let Some(key) = question_key(id) else {
            return Ok(None);
        };
        let row = sqlx::query(
            r"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE id = ?1
            ",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(map_question_row).transpose()
    }

    async fn insert_new_question(
        &self,
        record: NewQuestionRecord,
    ) -> Result<QuestionId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(record.question)
        .bind(record.answer)
        .bind(category_id_to_i64(record.category)?)
        .bind(i64::from(record.difficulty.value()))
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        question_id_from_i64(res.last_insert_rowid())
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError> {
        let Some(key) = question_key(id) else {
            return Err(StorageError::NotFound);
        };
        let res = sqlx::query("DELETE FROM questions WHERE id = ?1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
