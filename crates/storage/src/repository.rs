use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use trivia_core::model::{
    Category, CategoryId, CategoryScope, Difficulty, Question, QuestionId, ValidatedQuestion,
};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Insert shape for a question; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestionRecord {
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: Difficulty,
}

impl NewQuestionRecord {
    #[must_use]
    pub fn from_validated(validated: ValidatedQuestion) -> Self {
        Self {
            question: validated.question,
            answer: validated.answer,
            category: validated.category,
            difficulty: validated.difficulty,
        }
    }

    fn into_question(self, id: QuestionId) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

/// Repository contract for categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError>;

    /// Fetch a category by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StorageError>;

    /// Persist or rename a category. Used when seeding.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the category cannot be stored.
    async fn upsert_category(&self, category: &Category) -> Result<(), StorageError>;
}

/// Repository contract for questions.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Questions in the given scope, ordered by id ascending.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn list_questions(&self, scope: CategoryScope) -> Result<Vec<Question>, StorageError>;

    /// Fetch a question by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError>;

    /// Insert a question and return its new id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the category does not exist, or
    /// other storage errors.
    async fn insert_new_question(
        &self,
        record: NewQuestionRecord,
    ) -> Result<QuestionId, StorageError>;

    /// Delete a question.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no question has this id.
    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    categories: Arc<Mutex<BTreeMap<CategoryId, Category>>>,
    questions: Arc<Mutex<BTreeMap<QuestionId, Question>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            categories: Arc::new(Mutex::new(BTreeMap::new())),
            questions: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        let guard = self
            .categories
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.values().cloned().collect())
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StorageError> {
        let guard = self
            .categories
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&id).cloned())
    }

    async fn upsert_category(&self, category: &Category) -> Result<(), StorageError> {
        let mut guard = self
            .categories
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(category.id(), category.clone());
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn list_questions(&self, scope: CategoryScope) -> Result<Vec<Question>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .values()
            .filter(|q| scope.category_id().is_none_or(|id| q.category == id))
            .cloned()
            .collect())
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&id).cloned())
    }

    async fn insert_new_question(
        &self,
        record: NewQuestionRecord,
    ) -> Result<QuestionId, StorageError> {
        let category_exists = self
            .categories
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?
            .contains_key(&record.category);
        if !category_exists {
            return Err(StorageError::Conflict);
        }

        let mut guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        // Same rule as an SQLite rowid: one past the current maximum.
        let next = guard.keys().next_back().map_or(1, |id| id.value() + 1);
        let id = QuestionId::new(next);
        guard.insert(id, record.into_question(id));
        Ok(id)
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError> {
        let mut guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(&id).map(|_| ()).ok_or(StorageError::NotFound)
    }
}

/// Aggregates category and question repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub categories: Arc<dyn CategoryRepository>,
    pub questions: Arc<dyn QuestionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let categories: Arc<dyn CategoryRepository> = Arc::new(repo.clone());
        let questions: Arc<dyn QuestionRepository> = Arc::new(repo);
        Self {
            categories,
            questions,
        }
    }
}
