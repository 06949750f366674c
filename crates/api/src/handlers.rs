use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use trivia_core::model::{CategoryId, QuestionId};

use crate::dto::{
    CategoriesResponse, CreatedResponse, DeletedResponse, PageQuery, PostQuestionsResponse,
    QuestionsBody, QuestionsResponse, QuizBody, QuizResponse, ScopedQuestionsResponse,
};
use crate::error::ApiError;
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiError>;

/// `GET /categories`
pub async fn get_categories(State(state): State<AppState>) -> ApiResult<CategoriesResponse> {
    let categories = state.questions.categories().await?;
    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

/// `GET /questions?page=N`; an empty page is a 404.
pub async fn get_questions(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<QuestionsResponse> {
    let Query(query) = query?;
    let listed = state.questions.list_page(query.page()?).await?;
    if listed.questions.is_empty() {
        return Err(ApiError::not_found());
    }
    Ok(Json(listed.into()))
}

/// `POST /questions`: searches when the body carries `searchTerm`,
/// otherwise adds a question.
pub async fn post_questions(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
    body: Result<Json<QuestionsBody>, JsonRejection>,
) -> ApiResult<PostQuestionsResponse> {
    let Query(query) = query?;
    let Json(mut body) = body?;

    if let Some(term) = body.search_term.take() {
        let found = state.questions.search(&term, query.page()?).await?;
        return Ok(Json(PostQuestionsResponse::Search(found.into())));
    }

    let created = state.questions.create(body.into_draft()).await?;
    Ok(Json(PostQuestionsResponse::Created(CreatedResponse {
        success: true,
        created,
    })))
}

/// `DELETE /questions/{id}`
pub async fn delete_question(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<DeletedResponse> {
    let Path(id) = id?;
    let id = QuestionId::new(id);
    state.questions.delete(id).await?;
    Ok(Json(DeletedResponse {
        success: true,
        deleted: id,
    }))
}

/// `GET /categories/{id}/questions`
pub async fn get_category_questions(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<ScopedQuestionsResponse> {
    let Path(id) = id?;
    let listed = state.questions.list_by_category(CategoryId::new(id)).await?;
    Ok(Json(listed.into()))
}

/// `POST /quizzes`
pub async fn post_quizzes(
    State(state): State<AppState>,
    body: Result<Json<QuizBody>, JsonRejection>,
) -> ApiResult<QuizResponse> {
    let Json(body) = body?;
    let round = body.into_state()?;
    let pick = state.quiz.next_question(&round).await?;
    Ok(Json(pick.into()))
}

/// Unmatched paths.
pub async fn not_found() -> ApiError {
    ApiError::not_found()
}

/// Known path, unsupported method. Preflight requests get an empty 204.
pub async fn method_not_allowed(method: Method) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }
    ApiError::method_not_allowed().into_response()
}
