use std::sync::Arc;

use storage::repository::Storage;

use crate::RandomSource;
use crate::error::AppServicesError;
use crate::question_service::QuestionService;
use crate::quiz_service::QuizService;

/// Assembles the services the HTTP layer talks to.
#[derive(Clone)]
pub struct AppServices {
    questions: Arc<QuestionService>,
    quiz: Arc<QuizService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, rng: RandomSource) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, rng))
    }

    /// Build services over an already constructed storage backend.
    #[must_use]
    pub fn from_storage(storage: &Storage, rng: RandomSource) -> Self {
        let questions = Arc::new(QuestionService::new(
            Arc::clone(&storage.categories),
            Arc::clone(&storage.questions),
        ));
        let quiz = Arc::new(QuizService::new(
            rng,
            Arc::clone(&storage.categories),
            Arc::clone(&storage.questions),
        ));
        Self { questions, quiz }
    }

    #[must_use]
    pub fn questions(&self) -> Arc<QuestionService> {
        Arc::clone(&self.questions)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}
