use std::sync::Arc;

use services::{AppServices, QuestionService, QuizService};

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub questions: Arc<QuestionService>,
    pub quiz: Arc<QuizService>,
}

impl From<&AppServices> for AppState {
    fn from(services: &AppServices) -> Self {
        Self {
            questions: services.questions(),
            quiz: services.quiz(),
        }
    }
}
