//! Request and response bodies.

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use services::{CategoryQuestions, QuestionPage, SearchResults};
use trivia_core::model::{CategoryScope, Question, QuestionDraft, QuestionId, QuizPick, QuizState};

use crate::error::ApiError;

// ─── Lenient Numbers ───────────────────────────────────────────────────────────

/// Accept a JSON integer or a string holding one. Web forms post numbers as
/// strings. Null and blank strings read as absent.
fn number_or_numeric_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    struct Vis;

    impl<'de> Visitor<'de> for Vis {
        type Value = Option<i64>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("integer or numeric string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            i64::try_from(v)
                .map(Some)
                .map_err(|_| E::custom("integer out of range"))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            let v = v.trim();
            if v.is_empty() {
                return Ok(None);
            }
            v.parse().map(Some).map_err(E::custom)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<Self::Value, D2::Error> {
            d.deserialize_any(self)
        }
    }

    d.deserialize_any(Vis)
}

// ─── Requests ──────────────────────────────────────────────────────────────────

/// `?page=N`, kept as text so a bad value gets the JSON error envelope.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<String>,
}

impl PageQuery {
    /// The requested page, 1 when absent.
    ///
    /// # Errors
    ///
    /// Returns a 400 `ApiError` for zero, negative or non-numeric pages.
    pub fn page(&self) -> Result<NonZeroU32, ApiError> {
        match self.page.as_deref().map(str::trim) {
            None | Some("") => Ok(NonZeroU32::MIN),
            Some(raw) => raw
                .parse::<NonZeroU32>()
                .map_err(|_| ApiError::bad_request(format!("page: `{raw}` is not a positive integer"))),
        }
    }
}

/// Body of `POST /questions`: a search when `searchTerm` is set, otherwise a
/// new question.
#[derive(Debug, Default, Deserialize)]
pub struct QuestionsBody {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "number_or_numeric_string")]
    pub category: Option<i64>,
    #[serde(default, deserialize_with = "number_or_numeric_string")]
    pub difficulty: Option<i64>,
    #[serde(default, rename = "searchTerm")]
    pub search_term: Option<String>,
}

impl QuestionsBody {
    #[must_use]
    pub fn into_draft(self) -> QuestionDraft {
        QuestionDraft {
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

/// Clients also echo the category name as `type`; only `id` is read.
#[derive(Debug, Default, Deserialize)]
pub struct QuizCategoryBody {
    #[serde(default, deserialize_with = "number_or_numeric_string")]
    pub id: Option<i64>,
}

/// Body of `POST /quizzes`.
#[derive(Debug, Default, Deserialize)]
pub struct QuizBody {
    #[serde(default)]
    pub previous_questions: Option<Vec<u64>>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategoryBody>,
}

impl QuizBody {
    /// # Errors
    ///
    /// Returns a 400 `ApiError` for a negative category id.
    pub fn into_state(self) -> Result<QuizState, ApiError> {
        let raw = self.quiz_category.and_then(|c| c.id).unwrap_or(0);
        let raw = u64::try_from(raw).map_err(|_| {
            ApiError::bad_request(format!("quiz_category.id: `{raw}` is not a category id"))
        })?;
        let previous = self
            .previous_questions
            .unwrap_or_default()
            .into_iter()
            .map(QuestionId::new);
        Ok(QuizState::new(previous, CategoryScope::from_raw(raw)))
    }
}

// ─── Responses ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: BTreeMap<String, String>,
    pub current_category: String,
}

impl From<QuestionPage> for QuestionsResponse {
    fn from(page: QuestionPage) -> Self {
        Self {
            success: true,
            questions: page.questions,
            total_questions: page.total_questions,
            categories: page.categories,
            current_category: page.current_category,
        }
    }
}

/// Questions narrowed to a category or a search term.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopedQuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: String,
}

impl From<CategoryQuestions> for ScopedQuestionsResponse {
    fn from(listed: CategoryQuestions) -> Self {
        Self {
            success: true,
            questions: listed.questions,
            total_questions: listed.total_questions,
            current_category: listed.current_category,
        }
    }
}

impl From<SearchResults> for ScopedQuestionsResponse {
    fn from(found: SearchResults) -> Self {
        Self {
            success: true,
            questions: found.questions,
            total_questions: found.total_questions,
            current_category: found.current_category,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub created: QuestionId,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: QuestionId,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PostQuestionsResponse {
    Search(ScopedQuestionsResponse),
    Created(CreatedResponse),
}

/// `question` is `null` once the round is exhausted.
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Option<Question>,
}

impl From<QuizPick> for QuizResponse {
    fn from(pick: QuizPick) -> Self {
        Self {
            success: true,
            question: pick.into_question(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use trivia_core::model::CategoryId;

    fn page_of(raw: Option<&str>) -> Result<NonZeroU32, ApiError> {
        PageQuery {
            page: raw.map(str::to_owned),
        }
        .page()
    }

    #[test]
    fn page_defaults_to_one_and_rejects_zero() {
        assert_eq!(page_of(None).unwrap().get(), 1);
        assert_eq!(page_of(Some(" 3 ")).unwrap().get(), 3);
        for bad in ["0", "-2", "two"] {
            assert_eq!(page_of(Some(bad)).unwrap_err().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn create_body_accepts_numeric_strings() {
        let body: QuestionsBody = serde_json::from_str(
            r#"{"question":"Q?","answer":"A","category":"3","difficulty":4}"#,
        )
        .unwrap();
        assert!(body.search_term.is_none());
        let draft = body.into_draft();
        assert_eq!(draft.category, Some(3));
        assert_eq!(draft.difficulty, Some(4));
    }

    #[test]
    fn create_body_rejects_fractional_difficulty() {
        let parsed = serde_json::from_str::<QuestionsBody>(r#"{"difficulty":2.5}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn null_and_blank_numbers_read_as_missing() {
        let body: QuestionsBody =
            serde_json::from_str(r#"{"category":null,"difficulty":" "}"#).unwrap();
        assert_eq!(body.category, None);
        assert_eq!(body.difficulty, None);
    }

    #[test]
    fn search_term_is_detected_even_when_empty() {
        let body: QuestionsBody = serde_json::from_str(r#"{"searchTerm":""}"#).unwrap();
        assert_eq!(body.search_term.as_deref(), Some(""));
    }

    #[test]
    fn quiz_body_defaults_to_fresh_all_categories_round() {
        let state = serde_json::from_str::<QuizBody>("{}")
            .unwrap()
            .into_state()
            .unwrap();
        assert_eq!(state.scope(), CategoryScope::All);
        assert!(state.previous().is_empty());
    }

    #[test]
    fn quiz_body_reads_client_round() {
        let state = serde_json::from_str::<QuizBody>(
            r#"{"previous_questions":[4,9],"quiz_category":{"type":"Science","id":"1"}}"#,
        )
        .unwrap()
        .into_state()
        .unwrap();
        assert_eq!(state.scope(), CategoryScope::Only(CategoryId::new(1)));
        assert_eq!(state.previous(), &[QuestionId::new(4), QuestionId::new(9)]);
    }

    #[test]
    fn quiz_click_category_means_all() {
        let state = serde_json::from_str::<QuizBody>(
            r#"{"previous_questions":[],"quiz_category":{"type":"click","id":0}}"#,
        )
        .unwrap()
        .into_state()
        .unwrap();
        assert_eq!(state.scope(), CategoryScope::All);
    }

    #[test]
    fn quiz_negative_category_is_bad_request() {
        let err = serde_json::from_str::<QuizBody>(r#"{"quiz_category":{"id":-1}}"#)
            .unwrap()
            .into_state()
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn exhausted_round_serializes_null_question() {
        let json = serde_json::to_value(QuizResponse::from(QuizPick::Exhausted)).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "question": null}));
    }

    #[test]
    fn page_response_uses_camel_case_keys() {
        let json = serde_json::to_value(QuestionsResponse::from(QuestionPage {
            questions: Vec::new(),
            total_questions: 0,
            categories: BTreeMap::new(),
            current_category: "All".into(),
        }))
        .unwrap();
        assert_eq!(json["totalQuestions"], 0);
        assert_eq!(json["currentCategory"], "All");
    }
}
