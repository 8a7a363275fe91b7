pub mod books;
pub mod chat;
pub mod health;
pub mod orders;

use axum::{routing::get, Router};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/search", get(books::search_books))
        .route("/books/random", get(books::random_book))
        // Orders
        .route("/orders", get(orders::list_orders).post(orders::place_order))
        // Recommendation chat
        .route("/chat", get(chat::get_transcript).post(chat::chat_handler))
        .with_state(state)
}
