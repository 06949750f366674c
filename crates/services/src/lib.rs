#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod question_service;
pub mod quiz_service;

pub use trivia_core::RandomSource;

pub use app_services::AppServices;
pub use error::{AppServicesError, ErrorKind, Missing, ServiceError};
pub use question_service::{CategoryQuestions, QuestionPage, QuestionService, SearchResults};
pub use quiz_service::QuizService;
