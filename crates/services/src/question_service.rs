use std::collections::BTreeMap;
use std::num::NonZeroU32;
use std::sync::Arc;

use storage::repository::{CategoryRepository, NewQuestionRecord, QuestionRepository, StorageError};
use trivia_core::model::{
    CategoryId, CategoryScope, Question, QuestionDraft, QuestionId, QuestionValidationError,
};
use trivia_core::{
    ALL_CATEGORIES_LABEL, QUESTIONS_PER_PAGE, current_category_label, paginate, search,
    to_category_mapping,
};

use crate::error::{Missing, ServiceError};

/// One page of the whole question bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: BTreeMap<String, String>,
    pub current_category: String,
}

/// Every question of a single category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryQuestions {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: String,
}

/// One page of search matches; `total_questions` counts every match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: String,
}

/// Listing, searching, adding and deleting questions.
#[derive(Clone)]
pub struct QuestionService {
    categories: Arc<dyn CategoryRepository>,
    questions: Arc<dyn QuestionRepository>,
    page_size: usize,
}

impl QuestionService {
    #[must_use]
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        questions: Arc<dyn QuestionRepository>,
    ) -> Self {
        Self {
            categories,
            questions,
            page_size: QUESTIONS_PER_PAGE,
        }
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Category id to display name.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::StoreUnavailable` if the store cannot be read.
    pub async fn categories(&self) -> Result<BTreeMap<String, String>, ServiceError> {
        let categories = self.categories.list_categories().await?;
        tracing::debug!(count = categories.len(), "listed categories");
        Ok(to_category_mapping(&categories))
    }

    /// One page of every question, ordered by id.
    ///
    /// A page past the end comes back with no questions.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::StoreUnavailable` if the store cannot be read.
    pub async fn list_page(&self, page: NonZeroU32) -> Result<QuestionPage, ServiceError> {
        let all = self.questions.list_questions(CategoryScope::All).await?;
        let categories = self.categories.list_categories().await?;
        let questions = paginate(&all, page, self.page_size).to_vec();
        tracing::debug!(page = page.get(), total = all.len(), shown = questions.len(), "listed questions");

        Ok(QuestionPage {
            questions,
            total_questions: all.len(),
            categories: to_category_mapping(&categories),
            current_category: ALL_CATEGORIES_LABEL.to_owned(),
        })
    }

    /// Every question of one category.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` for an unknown category.
    /// Returns `ServiceError::StoreUnavailable` if the store cannot be read.
    pub async fn list_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<CategoryQuestions, ServiceError> {
        let scope = CategoryScope::Only(category_id);
        let categories = self.categories.list_categories().await?;
        let current_category = current_category_label(scope, &categories)
            .ok_or(ServiceError::NotFound(Missing::Category(category_id)))?;

        let questions = self.questions.list_questions(scope).await?;
        tracing::debug!(%category_id, total = questions.len(), "listed category questions");

        Ok(CategoryQuestions {
            total_questions: questions.len(),
            questions,
            current_category,
        })
    }

    /// One page of the questions whose text contains `term`, ignoring case.
    ///
    /// A blank term matches every question.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::StoreUnavailable` if the store cannot be read.
    pub async fn search(
        &self,
        term: &str,
        page: NonZeroU32,
    ) -> Result<SearchResults, ServiceError> {
        let all = self.questions.list_questions(CategoryScope::All).await?;
        let matches = search(&all, term);
        tracing::debug!(term, matches = matches.len(), "searched questions");

        Ok(SearchResults {
            questions: paginate(&matches, page, self.page_size).to_vec(),
            total_questions: matches.len(),
            current_category: ALL_CATEGORIES_LABEL.to_owned(),
        })
    }

    /// Validate a draft and store it as a new question.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` when a field is missing or malformed,
    /// including a category that does not exist.
    /// Returns `ServiceError::StoreUnavailable` if persistence fails.
    pub async fn create(&self, draft: QuestionDraft) -> Result<QuestionId, ServiceError> {
        let validated = draft.validate()?;
        let category = validated.category;

        if self.categories.get_category(category).await?.is_none() {
            return Err(QuestionValidationError::UnknownCategory(category).into());
        }

        let id = self
            .questions
            .insert_new_question(NewQuestionRecord::from_validated(validated))
            .await
            .map_err(|err| match err {
                // The category vanished between the check and the insert.
                StorageError::Conflict => {
                    ServiceError::from(QuestionValidationError::UnknownCategory(category))
                }
                other => ServiceError::from(other),
            })?;

        tracing::info!(question_id = %id, %category, "created question");
        Ok(id)
    }

    /// Delete a question by id.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no question has this id.
    /// Returns `ServiceError::StoreUnavailable` if the store cannot be written.
    pub async fn delete(&self, id: QuestionId) -> Result<(), ServiceError> {
        self.questions.delete_question(id).await.map_err(|err| match err {
            StorageError::NotFound => ServiceError::NotFound(Missing::Question(id)),
            other => ServiceError::from(other),
        })?;
        tracing::info!(question_id = %id, "deleted question");
        Ok(())
    }
}
