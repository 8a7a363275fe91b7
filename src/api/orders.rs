use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::infrastructure::AppState;
use crate::models::Order;

#[derive(Deserialize)]
pub struct OrderRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub title: String,
}

pub async fn list_orders(State(state): State<AppState>) -> impl IntoResponse {
    let orders = state.orders.read().await;
    Json(json!({
        "orders": orders.orders(),
        "total": orders.len()
    }))
}

/// Availability check plus order recording. Unavailable titles are reported
/// but never logged as orders.
pub async fn place_order(
    State(state): State<AppState>,
    Json(req): Json<OrderRequest>,
) -> impl IntoResponse {
    let name = req.name.trim();
    let phone = req.phone.trim();
    let email = req.email.trim();
    let title = req.title.trim();

    if name.is_empty() || phone.is_empty() || email.is_empty() || title.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "Validation error: all fields are required" })),
        )
            .into_response();
    }

    let available = state.library.read().await.is_available(title);
    if !available {
        return Json(json!({
            "available": false,
            "recorded": false,
            "message": "The book is not available"
        }))
        .into_response();
    }

    let order = Order {
        name: name.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        title: title.to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    let mut orders = state.orders.write().await;
    match orders.record(order.clone()) {
        Ok(()) => (
            StatusCode::CREATED,
            Json(json!({
                "available": true,
                "recorded": true,
                "message": "Order received",
                "order": order
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to record order: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
