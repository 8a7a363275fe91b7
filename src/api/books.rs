use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::domain::LibraryError;
use crate::infrastructure::AppState;

#[derive(Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub title: Option<String>,
}

pub async fn list_books(State(state): State<AppState>) -> impl IntoResponse {
    let library = state.library.read().await;
    Json(json!({
        "books": library.books(),
        "total": library.len()
    }))
}

pub async fn create_book(
    State(state): State<AppState>,
    Json(book): Json<NewBook>,
) -> impl IntoResponse {
    let mut library = state.library.write().await;
    match library.add(&book.title, &book.author, &book.description) {
        Ok(added) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Book added successfully",
                "book": added
            })),
        ),
        Err(e @ LibraryError::Validation(_)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": e.to_string() })),
        ),
        Err(e) => {
            tracing::error!("Failed to save library: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        }
    }
}

pub async fn search_books(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> impl IntoResponse {
    let term = params.title.unwrap_or_default();
    let library = state.library.read().await;
    let books = library.search_title(&term);
    let total = books.len();

    Json(json!({
        "books": books,
        "total": total
    }))
}

pub async fn random_book(State(state): State<AppState>) -> impl IntoResponse {
    let library = state.library.read().await;
    match library.pick_random() {
        Ok(book) => (StatusCode::OK, Json(json!({ "book": book }))),
        Err(e) => (StatusCode::NOT_FOUND, Json(json!({ "error": e.to_string() }))),
    }
}
