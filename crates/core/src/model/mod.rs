mod category;
mod ids;
mod question;
mod quiz;

pub use ids::{CategoryId, QuestionId};

pub use category::{Category, CategoryError, CategoryName};
pub use question::{
    Difficulty, Field, Question, QuestionDraft, QuestionValidationError, ValidatedQuestion,
};
pub use quiz::{CategoryScope, QuizPick, QuizState};
