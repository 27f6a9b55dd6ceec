//! HTTP route integration tests
//!
//! The router is built without a database, so these cover routing, auth
//! guards, error bodies and the fallback. Database-backed flows live in
//! `database_flows.rs`.

mod common;

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use reactshop::backend::routes::create_router;
use reactshop::backend::server::AppState;

use common::{admin_token, auth_header, test_config, user_token};

fn create_test_server() -> TestServer {
    let app = create_router(AppState::new(test_config(), None));
    TestServer::new(app).expect("Failed to start test server")
}

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&auth_header(token)).unwrap()
}

fn product_body() -> serde_json::Value {
    serde_json::json!({
        "name": "USB Headset",
        "price": 12000.0,
        "description": "Closed-back",
        "imageUrl": "https://example.com/headset.png"
    })
}

#[tokio::test]
async fn unknown_route_falls_back_to_404() {
    let server = create_test_server();

    let response = server.get("/does/not/exist").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "404 Not Found");
}

#[tokio::test]
async fn product_listing_without_database_is_unavailable() {
    let server = create_test_server();

    let response = server.get("/api/products").await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], 503);
}

#[tokio::test]
async fn order_without_token_is_unauthorized() {
    let server = create_test_server();

    let response = server
        .post("/api/orders")
        .json(&serde_json::json!({ "items": [] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn tampered_token_is_unauthorized() {
    let server = create_test_server();
    let mut token = user_token();
    token.push('x');

    let response = server
        .get("/api/auth/me")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn product_mutations_require_admin() {
    let server = create_test_server();

    let anonymous = server.post("/api/products").json(&product_body()).await;
    assert_eq!(anonymous.status_code(), StatusCode::UNAUTHORIZED);

    let as_user = server
        .post("/api/products")
        .add_header(header::AUTHORIZATION, bearer(&user_token()))
        .json(&product_body())
        .await;
    assert_eq!(as_user.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(
        as_user.json::<serde_json::Value>(),
        serde_json::json!({ "error": "Admins only", "status": 403 })
    );

    let delete_as_user = server
        .delete("/api/products/1")
        .add_header(header::AUTHORIZATION, bearer(&user_token()))
        .await;
    assert_eq!(delete_as_user.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_passes_guard_and_reaches_database_check() {
    let server = create_test_server();

    let response = server
        .put("/api/products/1")
        .add_header(header::AUTHORIZATION, bearer(&admin_token()))
        .json(&product_body())
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn order_listing_is_admin_only() {
    let server = create_test_server();

    let as_user = server
        .get("/api/orders")
        .add_header(header::AUTHORIZATION, bearer(&user_token()))
        .await;
    assert_eq!(as_user.status_code(), StatusCode::FORBIDDEN);

    let as_admin = server
        .get("/api/orders")
        .add_header(header::AUTHORIZATION, bearer(&admin_token()))
        .await;
    assert_eq!(as_admin.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn login_without_database_is_unavailable() {
    let server = create_test_server();

    let response = server
        .post("/api/auth/login")
        .json(&serde_json::json!({ "username": "admin", "password": "admin123" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let server = create_test_server();

    let response = server
        .get("/api/products")
        .add_header(header::ORIGIN, HeaderValue::from_static("http://localhost:5173"))
        .await;

    assert_eq!(
        response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        HeaderValue::from_static("*")
    );
}
