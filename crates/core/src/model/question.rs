use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::{CategoryId, QuestionId};

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty rating on the 1..=5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Creates a difficulty from a raw integer.
    ///
    /// # Errors
    ///
    /// Returns `QuestionValidationError::DifficultyOutOfRange` outside 1..=5.
    pub fn new(value: i64) -> Result<Self, QuestionValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(QuestionValidationError::DifficultyOutOfRange(value))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Difficulty {
    type Error = QuestionValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Difficulty> for u8 {
    fn from(value: Difficulty) -> Self {
        value.0
    }
}

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Raw, unvalidated input for a new question.
///
/// Every field is optional so that a missing value surfaces as a field-level
/// validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<i64>,
    pub difficulty: Option<i64>,
}

impl QuestionDraft {
    /// Validate every field and produce a question ready for insertion.
    ///
    /// Text fields are trimmed. The category is only checked for shape here;
    /// whether it exists is decided by the caller against the store.
    ///
    /// # Errors
    ///
    /// Returns the first `QuestionValidationError` encountered, in field order.
    pub fn validate(self) -> Result<ValidatedQuestion, QuestionValidationError> {
        let question = required_text(self.question, Field::Question)?;
        let answer = required_text(self.answer, Field::Answer)?;

        let raw_category = self
            .category
            .ok_or(QuestionValidationError::MissingField(Field::Category))?;
        let category = u64::try_from(raw_category)
            .ok()
            .filter(|v| *v > 0)
            .map(CategoryId::new)
            .ok_or(QuestionValidationError::InvalidCategory(raw_category))?;

        let difficulty = Difficulty::new(
            self.difficulty
                .ok_or(QuestionValidationError::MissingField(Field::Difficulty))?,
        )?;

        Ok(ValidatedQuestion {
            question,
            answer,
            category,
            difficulty,
        })
    }
}

fn required_text(value: Option<String>, field: Field) -> Result<String, QuestionValidationError> {
    let raw = value.ok_or(QuestionValidationError::MissingField(field))?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(QuestionValidationError::BlankField(field));
    }
    Ok(trimmed.to_owned())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuestion {
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: Difficulty,
}

/// A stored trivia question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: Difficulty,
}

//
// ─── VALIDATION ERRORS ─────────────────────────────────────────────────────────
//

/// Input field of a question draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Question,
    Answer,
    Category,
    Difficulty,
}

impl Field {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Question => "question",
            Field::Answer => "answer",
            Field::Category => "category",
            Field::Difficulty => "difficulty",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionValidationError {
    #[error("{0}: field is required")]
    MissingField(Field),

    #[error("{0}: must not be blank")]
    BlankField(Field),

    #[error("category: {0} is not a valid category id")]
    InvalidCategory(i64),

    #[error("category: {0} does not exist")]
    UnknownCategory(CategoryId),

    #[error("difficulty: {0} is outside 1..=5")]
    DifficultyOutOfRange(i64),
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn full_draft() -> QuestionDraft {
        QuestionDraft {
            question: Some("  What is the heaviest organ in the human body?  ".into()),
            answer: Some("The Liver".into()),
            category: Some(1),
            difficulty: Some(4),
        }
    }

    #[test]
    fn valid_draft_is_trimmed() {
        let question = full_draft().validate().unwrap();

        assert_eq!(
            question.question,
            "What is the heaviest organ in the human body?"
        );
        assert_eq!(question.category, CategoryId::new(1));
        assert_eq!(question.difficulty.value(), 4);
    }

    #[test]
    fn missing_question_is_reported_first() {
        let draft = QuestionDraft {
            question: None,
            answer: None,
            ..full_draft()
        };
        let err = draft.validate().unwrap_err();
        assert_eq!(err, QuestionValidationError::MissingField(Field::Question));
        assert_eq!(err.to_string(), "question: field is required");
    }

    #[test]
    fn blank_answer_is_rejected() {
        let draft = QuestionDraft {
            answer: Some("   ".into()),
            ..full_draft()
        };
        let err = draft.validate().unwrap_err();
        assert_eq!(err, QuestionValidationError::BlankField(Field::Answer));
    }

    #[test]
    fn non_positive_category_is_rejected() {
        let draft = QuestionDraft {
            category: Some(0),
            ..full_draft()
        };
        assert_eq!(
            draft.validate().unwrap_err(),
            QuestionValidationError::InvalidCategory(0)
        );
    }

    #[test]
    fn difficulty_must_be_present_and_in_range() {
        let missing = QuestionDraft {
            difficulty: None,
            ..full_draft()
        };
        assert_eq!(
            missing.validate().unwrap_err(),
            QuestionValidationError::MissingField(Field::Difficulty)
        );

        for bad in [0, 6, -3, 300] {
            let draft = QuestionDraft {
                difficulty: Some(bad),
                ..full_draft()
            };
            assert_eq!(
                draft.validate().unwrap_err(),
                QuestionValidationError::DifficultyOutOfRange(bad)
            );
        }
    }

    #[test]
    fn question_serializes_to_wire_shape() {
        let validated = full_draft().validate().unwrap();
        let question = Question {
            id: QuestionId::new(5),
            question: validated.question,
            answer: validated.answer,
            category: validated.category,
            difficulty: validated.difficulty,
        };
        let value = serde_json::to_value(&question).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 5,
                "question": "What is the heaviest organ in the human body?",
                "answer": "The Liver",
                "category": 1,
                "difficulty": 4
            })
        );
    }

    #[test]
    fn difficulty_deserialization_enforces_range() {
        assert!(serde_json::from_str::<Difficulty>("3").is_ok());
        assert!(serde_json::from_str::<Difficulty>("9").is_err());
    }
}
