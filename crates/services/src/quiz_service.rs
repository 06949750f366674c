use std::sync::Arc;

use storage::repository::{CategoryRepository, QuestionRepository};
use trivia_core::model::{CategoryScope, QuizPick, QuizState};

use crate::RandomSource;
use crate::error::{Missing, ServiceError};

/// Serves quiz questions one at a time without keeping round state.
#[derive(Clone)]
pub struct QuizService {
    rng: RandomSource,
    categories: Arc<dyn CategoryRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl QuizService {
    #[must_use]
    pub fn new(
        rng: RandomSource,
        categories: Arc<dyn CategoryRepository>,
        questions: Arc<dyn QuestionRepository>,
    ) -> Self {
        Self {
            rng,
            categories,
            questions,
        }
    }

    /// Pick a random question from the round's category that the client has
    /// not been served yet.
    ///
    /// Returns `QuizPick::Exhausted` once every candidate has been seen,
    /// including when the category holds no questions at all.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the round names an unknown category.
    /// Returns `ServiceError::StoreUnavailable` if the store cannot be read.
    pub async fn next_question(&self, state: &QuizState) -> Result<QuizPick, ServiceError> {
        let scope = state.scope();
        if let CategoryScope::Only(category_id) = scope {
            if self.categories.get_category(category_id).await?.is_none() {
                return Err(ServiceError::NotFound(Missing::Category(category_id)));
            }
        }

        let pool = self.questions.list_questions(scope).await?;
        let pick = self.rng.pick(&pool, &state.excluded());

        match &pick {
            QuizPick::Next(question) => tracing::debug!(
                question_id = %question.id,
                pool = pool.len(),
                previous = state.previous().len(),
                "picked quiz question"
            ),
            QuizPick::Exhausted => tracing::debug!(
                pool = pool.len(),
                previous = state.previous().len(),
                "quiz round exhausted"
            ),
        }
        Ok(pick)
    }
}
