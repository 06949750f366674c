use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::middleware;
use axum::response::Response;
use axum::routing::{delete, get, post};

use crate::handlers;
use crate::state::AppState;

const ALLOW_HEADERS: &str = "Content-Type,Authorization,true";
const ALLOW_METHODS: &str = "GET,PUT,POST,DELETE,OPTIONS";

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(handlers::get_categories))
        .route(
            "/categories/{id}/questions",
            get(handlers::get_category_questions),
        )
        .route(
            "/questions",
            get(handlers::get_questions).post(handlers::post_questions),
        )
        .route("/questions/{id}", delete(handlers::delete_question))
        .route("/quizzes", post(handlers::post_quizzes))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .layer(middleware::map_response(cors_headers))
        .with_state(state)
}

/// Every response, errors included, is readable cross-origin.
async fn cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    response
}
