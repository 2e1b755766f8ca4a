// tests/api_tests.rs

use std::sync::Arc;

use prepbook::{config::Config, routes, state::AppState, storage::MemStorage};

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
///
/// Tests run against the in-memory storage adapter with demo data, so no
/// external database is required.
async fn spawn_app() -> String {
    let config = Config {
        database_url: None,
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600, // 10 minutes for tests
        rust_log: "error".to_string(),
    };

    let state = AppState {
        storage: Arc::new(MemStorage::with_demo_data()),
        config,
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

fn unique_username() -> String {
    format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8])
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn register_works() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let username = unique_username();

    // Act
    let response = client
        .post(&format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "password123",
            "fullName": "Test User"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["username"], username.as_str());
    // Password hash must never be serialized.
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn register_fails_validation() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act: Send a username that is too short
    let response = client
        .post(&format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "username": "yo",
            "email": "yo@example.com",
            "password": "password123",
            "fullName": "Yo"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn register_rejects_duplicate_username() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let username = unique_username();
    let payload = serde_json::json!({
        "username": username,
        "email": format!("{}@example.com", username),
        "password": "password123",
        "fullName": "Test User"
    });

    client
        .post(&format!("{}/api/auth/register", address))
        .json(&payload)
        .send()
        .await
        .expect("First register failed");

    // Act
    let response = client
        .post(&format!("{}/api/auth/register", address))
        .json(&payload)
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn login_and_me_round_trip() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let username = unique_username();

    client
        .post(&format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "password123",
            "fullName": "Round Trip"
        }))
        .send()
        .await
        .expect("Register failed");

    // Act
    let login_resp = client
        .post(&format!("{}/api/auth/login", address))
        .json(&serde_json::json!({
            "username": username,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Login failed")
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse login json");

    let token = login_resp["token"].as_str().expect("Token not found");
    assert_eq!(login_resp["type"], "Bearer");

    let me = client
        .get(&format!("{}/api/auth/me", address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Fetch profile failed")
        .json::<serde_json::Value>()
        .await
        .unwrap();

    // Assert
    assert_eq!(me["username"], username.as_str());
    assert_eq!(me["fullName"], "Round Trip");
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let username = unique_username();

    client
        .post(&format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "password123",
            "fullName": "Test User"
        }))
        .send()
        .await
        .expect("Register failed");

    // Act
    let response = client
        .post(&format!("{}/api/auth/login", address))
        .json(&serde_json::json!({
            "username": username,
            "password": "wrong_password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn catalog_endpoints_serve_demo_data() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act / Assert: categories
    let categories: Vec<serde_json::Value> = client
        .get(&format!("{}/api/exam-categories", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!categories.is_empty());

    // Category lookup by slug
    let category: serde_json::Value = client
        .get(&format!(
            "{}/api/exam-categories/slug/banking-insurance",
            address
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(category["name"], "Banking & Insurance");

    // Courses filtered by category
    let courses: Vec<serde_json::Value> = client
        .get(&format!("{}/api/courses/category/1", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(courses.iter().all(|c| c["categoryId"] == 1));

    // Mock tests by series
    let tests: Vec<serde_json::Value> = client
        .get(&format!("{}/api/mock-tests/series/1", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(tests.len(), 2);

    // Single mock test carries the attempt metadata
    let test: serde_json::Value = client
        .get(&format!("{}/api/mock-tests/1", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(test["duration"], 30);
    assert_eq!(test["totalQuestions"], 3);

    // Unknown ids are 404
    let missing = client
        .get(&format!("{}/api/mock-tests/999", address))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);
}

#[tokio::test]
async fn questions_require_authentication() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(&format!("{}/api/questions/1", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn submit_requires_authentication() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .post(&format!("{}/api/submit-test/1", address))
        .json(&serde_json::json!({ "answers": [null, null, null] }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 401);
}
