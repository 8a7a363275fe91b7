use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::json;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot`
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cribris::infrastructure::AppState;
use cribris::recommender::Recommender;
use cribris::server::build_router;
use cribris::store::{LibraryStore, OrderLog};

// Helper to create a state over empty stores in a fresh temp directory
fn setup_test_state(dir: &TempDir, recommender: Option<Recommender>) -> AppState {
    let library = LibraryStore::open(dir.path().join("library.json")).expect("Failed to open store");
    let orders = OrderLog::open(dir.path().join("orders.json")).expect("Failed to open order log");
    AppState::new(library, orders, recommender)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, payload: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let dir = TempDir::new().unwrap();
    let app: Router = build_router(setup_test_state(&dir, None));

    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "cribris");
}

#[tokio::test]
async fn test_create_book_requires_title_and_author() {
    let dir = TempDir::new().unwrap();
    let app = build_router(setup_test_state(&dir, None));

    let payload = json!({ "title": "  ", "author": "Frank Herbert" });
    let response = app
        .clone()
        .oneshot(post_json("/api/books", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Nothing was added
    let response = app.oneshot(get("/api/books")).await.unwrap();
    let json = body_json(response).await;
    assert_eq!(json["total"], 0);
}

#[tokio::test]
async fn test_random_book_on_empty_library_is_404() {
    let dir = TempDir::new().unwrap();
    let app = build_router(setup_test_state(&dir, None));

    let response = app.oneshot(get("/api/books/random")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"], "The library is empty");
}

#[tokio::test]
async fn test_end_to_end_add_search_random_reload() {
    let dir = TempDir::new().unwrap();
    let app = build_router(setup_test_state(&dir, None));

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/books",
            &json!({ "title": "Dune", "author": "Frank Herbert", "description": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/books",
            &json!({ "title": "1984", "author": "George Orwell", "description": "dystopia" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Substring search finds exactly the 1984 record
    let response = app
        .clone()
        .oneshot(get("/api/books/search?title=84"))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["books"][0]["title"], "1984");

    // Random pick returns one of the two
    let response = app.clone().oneshot(get("/api/books/random")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let title = json["book"]["title"].as_str().unwrap();
    assert!(title == "Dune" || title == "1984");

    // Reloading durable storage yields the same two records in order
    let reloaded = LibraryStore::open(dir.path().join("library.json")).unwrap();
    let titles: Vec<&str> = reloaded.books().iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, ["Dune", "1984"]);
}

#[tokio::test]
async fn test_search_with_no_matches_is_an_empty_list() {
    let dir = TempDir::new().unwrap();
    let app = build_router(setup_test_state(&dir, None));

    app.clone()
        .oneshot(post_json(
            "/api/books",
            &json!({ "title": "Dune", "author": "Frank Herbert" }),
        ))
        .await
        .unwrap();

    let response = app.oneshot(get("/api/books/search?title=zzz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 0);
}

#[tokio::test]
async fn test_place_order_for_available_title_is_recorded() {
    let dir = TempDir::new().unwrap();
    let app = build_router(setup_test_state(&dir, None));

    app.clone()
        .oneshot(post_json(
            "/api/books",
            &json!({ "title": "Dune", "author": "Frank Herbert" }),
        ))
        .await
        .unwrap();

    let payload = json!({
        "name": "Ana",
        "phone": "0712345678",
        "email": "ana@example.com",
        "title": "dune"
    });
    let response = app
        .clone()
        .oneshot(post_json("/api/orders", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["available"], true);
    assert_eq!(json["recorded"], true);

    // Persisted: the log reloads with the order in it
    let log = OrderLog::open(dir.path().join("orders.json")).unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log.orders()[0].title, "dune");
}

#[tokio::test]
async fn test_place_order_for_missing_title_is_not_recorded() {
    let dir = TempDir::new().unwrap();
    let app = build_router(setup_test_state(&dir, None));

    let payload = json!({
        "name": "Ana",
        "phone": "0712345678",
        "email": "ana@example.com",
        "title": "Dune"
    });
    let response = app
        .clone()
        .oneshot(post_json("/api/orders", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["available"], false);
    assert_eq!(json["recorded"], false);

    let response = app.oneshot(get("/api/orders")).await.unwrap();
    let json = body_json(response).await;
    assert_eq!(json["total"], 0);
}

#[tokio::test]
async fn test_place_order_requires_all_fields() {
    let dir = TempDir::new().unwrap();
    let app = build_router(setup_test_state(&dir, None));

    let payload = json!({
        "name": "Ana",
        "phone": "",
        "email": "ana@example.com",
        "title": "Dune"
    });
    let response = app.oneshot(post_json("/api/orders", &payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_chat_without_api_key_is_503() {
    let dir = TempDir::new().unwrap();
    let app = build_router(setup_test_state(&dir, None));

    let response = app
        .oneshot(post_json("/api/chat", &json!({ "message": "hi" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_chat_turn_through_the_router() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "message": { "role": "assistant", "content": "Try Dune." } }
            ]
        })))
        .mount(&mock_server)
        .await;

    let recommender = Recommender::new(
        Some("test-key".to_string()),
        mock_server.uri(),
        "gpt-3.5-turbo".to_string(),
    )
    .unwrap();

    let dir = TempDir::new().unwrap();
    let app = build_router(setup_test_state(&dir, Some(recommender)));

    let response = app
        .clone()
        .oneshot(post_json("/api/chat", &json!({ "message": "I like sci-fi" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["text"], "Try Dune.");

    // Both sides of the exchange are in the transcript
    let response = app.oneshot(get("/api/chat")).await.unwrap();
    let json = body_json(response).await;
    let transcript = json["transcript"].as_array().unwrap();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0]["role"], "user");
    assert_eq!(transcript[1]["role"], "assistant");
}
