//! REST API integration tests

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use libris_server::api;

use crate::memory_state;

fn app() -> Router {
    api::router(memory_state())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register_ann(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/users/registerUser",
        Some(json!({
            "name": "Ann",
            "email": "ann@x.com",
            "password": "password123"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn create_book(app: &Router, title: &str, isbn: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/books",
        Some(json!({ "title": title, "author": "Bar", "isbn": isbn })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["available"], true);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = send(&app(), "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
async fn test_borrow_and_return_flow() {
    let app = app();
    let user_id = register_ann(&app).await;
    let book_id = create_book(&app, "Foo", "111").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/books/{}/borrowBook", book_id),
        Some(json!({ "user_id": user_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let borrow_id = body["borrow_id"].as_str().unwrap().to_string();
    let due_date = chrono::DateTime::parse_from_rfc3339(body["due_date"].as_str().unwrap())
        .unwrap()
        .with_timezone(&chrono::Utc);
    let lead = due_date - chrono::Utc::now();
    assert!(lead > chrono::Duration::days(13));
    assert!(lead <= chrono::Duration::days(14));

    let (_, book) = send(&app, "GET", &format!("/api/books/{}", book_id), None).await;
    assert_eq!(book["available"], false);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/books/{}/availability", book_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Borrowed");

    // a second borrow of the same copy is refused
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/books/{}/borrowBook", book_id),
        Some(json!({ "user_id": user_id })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "BookNotAvailable");

    let (status, body) = send(
        &app,
        "POST",
        "/api/books/returnBook",
        Some(json!({ "borrow_id": borrow_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, book) = send(&app, "GET", &format!("/api/books/{}", book_id), None).await;
    assert_eq!(book["available"], true);

    let (status, history) = send(&app, "GET", &format!("/api/users/{}/borrows", user_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert!(history[0]["return_date"].is_string());
}

#[tokio::test]
async fn test_register_validation_and_conflict() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/users/registerUser",
        Some(json!({ "name": "Ann", "email": "ann@x.com", "password": "short" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let (status, body) = send(
        &app,
        "POST",
        "/api/users/registerUser",
        Some(json!({ "name": "Ann", "email": "ann@x", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid email format");

    let (status, _) = send(
        &app,
        "POST",
        "/api/users/registerUser",
        Some(json!({ "email": "ann@x.com", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    register_ann(&app).await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/users/registerUser",
        Some(json!({ "name": "Ann", "email": "ann@x.com", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Duplicate");
}

#[tokio::test]
async fn test_login() {
    let app = app();
    let user_id = register_ann(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/users/loginUser",
        Some(json!({ "email": "ann@x.com", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], user_id.as_str());
    assert_eq!(body["token"], "sample-jwt-token");

    let (status, wrong_password) = send(
        &app,
        "POST",
        "/api/users/loginUser",
        Some(json!({ "email": "ann@x.com", "password": "wrongpassword" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, unknown_user) = send(
        &app,
        "POST",
        "/api/users/loginUser",
        Some(json!({ "email": "bob@x.com", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_user);
}

#[tokio::test]
async fn test_malformed_bodies_are_bad_requests() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/books/returnBook",
        Some(json!({ "borrow_id": 123 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request format"));

    // JSON payload without a Content-Type header
    let request = Request::builder()
        .method("POST")
        .uri("/api/users/registerUser")
        .body(Body::from(
            json!({ "name": "Ann", "email": "ann@x.com", "password": "password123" }).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "BadValue");

    let request = Request::builder()
        .method("POST")
        .uri("/api/books")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let app = app();

    let (status, _) = send(&app, "GET", "/api/books/book-123", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/books/{}", uuid::Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "POST",
        "/api/books/returnBook",
        Some(json!({ "borrow_id": uuid::Uuid::new_v4().to_string() })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "POST", "/api/books/returnBook", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_borrow_by_unknown_user() {
    let app = app();
    let book_id = create_book(&app, "Foo", "111").await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/books/{}/borrowBook", book_id),
        Some(json!({ "user_id": uuid::Uuid::new_v4().to_string() })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, book) = send(&app, "GET", &format!("/api/books/{}", book_id), None).await;
    assert_eq!(book["available"], true);
}

#[tokio::test]
async fn test_list_books_pages_by_title() {
    let app = app();
    for (title, isbn) in [("Charlie", "3"), ("Alpha", "1"), ("Bravo", "2")] {
        create_book(&app, title, isbn).await;
    }

    let (status, body) = send(&app, "GET", "/api/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 10);
    let titles: Vec<&str> = body["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Alpha", "Bravo", "Charlie"]);

    let (_, body) = send(&app, "GET", "/api/books?page_size=2&page=2", None).await;
    let books = body["books"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "Charlie");
}

#[tokio::test]
async fn test_duplicate_isbn_conflicts() {
    let app = app();
    create_book(&app, "Foo", "111").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/books",
        Some(json!({ "title": "Other", "author": "Someone", "isbn": "111" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (status, body) = send(&app(), "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/books/returnBook"].is_object());
}
