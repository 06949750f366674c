use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use trivia_core::model::{
    Category, CategoryId, CategoryName, Difficulty, Question, QuestionId,
};

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Classify a driver error: foreign key violations become `Conflict`,
/// everything else is treated as the store being unreachable.
pub(crate) fn db_err(e: sqlx::Error) -> StorageError {
    match &e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => StorageError::Conflict,
        _ => StorageError::Connection(e.to_string()),
    }
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn question_id_from_i64(v: i64) -> Result<QuestionId, StorageError> {
    Ok(QuestionId::new(i64_to_u64("question_id", v)?))
}

pub(crate) fn category_id_from_i64(v: i64) -> Result<CategoryId, StorageError> {
    Ok(CategoryId::new(i64_to_u64("category_id", v)?))
}

/// Lookup key for a question. Ids past `i64::MAX` cannot be stored, so
/// `None` means the question does not exist.
pub(crate) fn question_key(id: QuestionId) -> Option<i64> {
    i64::try_from(id.value()).ok()
}

/// Lookup key for a category; `None` as for [`question_key`].
pub(crate) fn category_key(id: CategoryId) -> Option<i64> {
    i64::try_from(id.value()).ok()
}

pub(crate) fn category_id_to_i64(id: CategoryId) -> Result<i64, StorageError> {
    category_key(id).ok_or_else(|| StorageError::Serialization("category_id overflow".into()))
}

pub(crate) fn map_question_row(row: &SqliteRow) -> Result<Question, StorageError> {
    Ok(Question {
        id: question_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        question: row.try_get("question").map_err(ser)?,
        answer: row.try_get("answer").map_err(ser)?,
        category: category_id_from_i64(row.try_get::<i64, _>("category").map_err(ser)?)?,
        difficulty: Difficulty::new(row.try_get::<i64, _>("difficulty").map_err(ser)?)
            .map_err(ser)?,
    })
}

pub(crate) fn map_category_row(row: &SqliteRow) -> Result<Category, StorageError> {
    Ok(Category::new(
        category_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        CategoryName::new(row.try_get::<String, _>("type").map_err(ser)?).map_err(ser)?,
    ))
}
