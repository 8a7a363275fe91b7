use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::infrastructure::AppState;
use crate::recommender::GREETING;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// One recommendation turn. Upstream failures are already stringified inside
/// the session, so a configured recommender always answers 200.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> impl IntoResponse {
    let mut guard = state.recommender.lock().await;
    match guard.as_mut() {
        Some(recommender) => {
            let text = recommender.recommend(&payload.message).await;
            Json(json!({ "text": text })).into_response()
        }
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "error": "Recommendations are not configured, set OPENAI_API_KEY in your .env file"
            })),
        )
            .into_response(),
    }
}

pub async fn get_transcript(State(state): State<AppState>) -> impl IntoResponse {
    let guard = state.recommender.lock().await;
    let transcript = guard
        .as_ref()
        .map(|r| r.transcript().to_vec())
        .unwrap_or_default();

    Json(json!({
        "greeting": GREETING,
        "transcript": transcript
    }))
}
