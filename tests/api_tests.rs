// Integration tests for the HTTP surface. The pool is lazy and points at
// an unreachable port, so everything here runs without a live Postgres;
// each test exercises a path that resolves before any query, or one where
// a dead database is the expected condition.
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use learnhub_api::auth::issue_jwt;
use learnhub_api::config::{
    Config, DatabaseConfig, JwtConfig, MlConfig, SeedConfig, ServerConfig,
};
use learnhub_api::db;
use learnhub_api::models::UserRole;
use learnhub_api::routes::create_router;
use learnhub_api::state::AppState;

const TEST_JWT_SECRET: &str = "integration-test-secret-at-least-32-chars";
const TEST_DATABASE_URL: &str = "postgres://localhost:1/learnhub_test";

fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            frontend_url: "http://localhost:5173".to_string(),
        },
        database: DatabaseConfig {
            url: Some(TEST_DATABASE_URL.to_string()),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry: 3600,
        },
        ml: MlConfig {
            service_url: None,
            request_timeout_ms: 1200,
        },
        seed: SeedConfig {
            admin_email: "admin@learnhub.dev".to_string(),
            admin_password: "AdminPass123!".to_string(),
        },
    }
}

fn test_app() -> axum::Router {
    let pool = db::create_pool(TEST_DATABASE_URL, 1).expect("Failed to create lazy pool");
    let state = AppState::new(pool, test_config(), None);
    create_router(state)
}

fn token_for(role: UserRole) -> String {
    issue_jwt(
        Uuid::new_v4(),
        "someone@learnhub.dev",
        role,
        TEST_JWT_SECRET,
        3600,
    )
    .expect("Failed to issue test token")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

fn get_with_auth(uri: &str, auth_value: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, auth_value)
        .body(Body::empty())
        .expect("Failed to build request")
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body was not JSON")
}

fn assert_error(body: &Value, code: &str, message: &str) {
    assert_eq!(body["error"]["code"], code);
    assert_eq!(body["error"]["message"], message);
}

#[tokio::test]
async fn test_liveness_reports_alive() {
    let response = test_app()
        .oneshot(get("/api/liveness"))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["alive"], true);
}

#[tokio::test]
async fn test_health_reports_database_disconnected() {
    let response = test_app()
        .oneshot(get("/api/health"))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "disconnected");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_readiness_fails_without_database() {
    let response = test_app()
        .oneshot(get("/api/readiness"))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "INTERNAL");
}

#[tokio::test]
async fn test_unknown_route_returns_json_not_found() {
    let response = test_app()
        .oneshot(get("/api/definitely-not-a-route"))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_error(&body, "NOT_FOUND", "Route not found");
}

#[tokio::test]
async fn test_unknown_route_outside_api_prefix() {
    let response = test_app()
        .oneshot(get("/nope"))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_error(&body, "NOT_FOUND", "Route not found");
}

#[tokio::test]
async fn test_protected_route_rejects_missing_token() {
    let response = test_app()
        .oneshot(get("/api/auth/me"))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_error(&body, "UNAUTHORIZED", "Missing authorization token");
}

#[tokio::test]
async fn test_protected_route_rejects_garbage_token() {
    let response = test_app()
        .oneshot(get_with_auth("/api/auth/me", "Bearer not-a-real-token"))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_error(&body, "UNAUTHORIZED", "Invalid or expired token");
}

#[tokio::test]
async fn test_protected_route_rejects_non_bearer_scheme() {
    let response = test_app()
        .oneshot(get_with_auth("/api/auth/me", "Basic dXNlcjpwYXNz"))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_error(&body, "UNAUTHORIZED", "Invalid or expired token");
}

#[tokio::test]
async fn test_protected_route_rejects_expired_token() {
    // Expiry far enough in the past to clear the 60 second leeway
    let token = issue_jwt(
        Uuid::new_v4(),
        "someone@learnhub.dev",
        UserRole::Student,
        TEST_JWT_SECRET,
        -300,
    )
    .expect("Failed to issue test token");

    let response = test_app()
        .oneshot(get_with_auth(
            "/api/auth/me",
            &format!("Bearer {}", token),
        ))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_error(&body, "UNAUTHORIZED", "Invalid or expired token");
}

#[tokio::test]
async fn test_register_rejects_short_name() {
    let payload = json!({
        "name": " J ",
        "email": "j@example.com",
        "password": "password123",
    });
    let response = test_app()
        .oneshot(json_request("POST", "/api/auth/register", None, payload))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_error(
        &body,
        "VALIDATION_ERROR",
        "name must be at least 2 characters",
    );
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let payload = json!({
        "name": "John Doe",
        "email": "not-an-email",
        "password": "password123",
    });
    let response = test_app()
        .oneshot(json_request("POST", "/api/auth/register", None, payload))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_error(&body, "VALIDATION_ERROR", "email is not valid");
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let payload = json!({
        "name": "John Doe",
        "email": "john@example.com",
        "password": "123",
    });
    let response = test_app()
        .oneshot(json_request("POST", "/api/auth/register", None, payload))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_error(
        &body,
        "VALIDATION_ERROR",
        "password must be at least 6 characters",
    );
}

#[tokio::test]
async fn test_login_requires_credentials() {
    let response = test_app()
        .oneshot(json_request("POST", "/api/auth/login", None, json!({})))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_error(&body, "VALIDATION_ERROR", "email and password are required");
}

#[tokio::test]
async fn test_quiz_submit_requires_fields() {
    // A valid token proves the middleware admits the request; the handler
    // then rejects the empty body before any query runs.
    let token = token_for(UserRole::Student);
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/quiz/submit",
            Some(&token),
            json!({}),
        ))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_error(
        &body,
        "VALIDATION_ERROR",
        "courseId, moduleId, and answers are required",
    );
}

#[tokio::test]
async fn test_quiz_submit_treats_null_answers_as_missing() {
    let token = token_for(UserRole::Student);
    let payload = json!({
        "courseId": Uuid::new_v4().to_string(),
        "moduleId": "module-1",
        "answers": null,
    });
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/quiz/submit",
            Some(&token),
            payload,
        ))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_error(
        &body,
        "VALIDATION_ERROR",
        "courseId, moduleId, and answers are required",
    );
}

#[tokio::test]
async fn test_quiz_submit_rejects_non_array_answers() {
    let token = token_for(UserRole::Student);
    let payload = json!({
        "courseId": Uuid::new_v4().to_string(),
        "moduleId": "module-1",
        "answers": 42,
    });
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/quiz/submit",
            Some(&token),
            payload,
        ))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_error(&body, "VALIDATION_ERROR", "answers must be an array");
}

#[tokio::test]
async fn test_enroll_requires_course_id() {
    let token = token_for(UserRole::Student);
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/enrollments",
            Some(&token),
            json!({ "courseId": "   " }),
        ))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_error(&body, "VALIDATION_ERROR", "courseId is required");
}

#[tokio::test]
async fn test_enroll_rejects_malformed_course_id() {
    let token = token_for(UserRole::Student);
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/enrollments",
            Some(&token),
            json!({ "courseId": "not-a-uuid" }),
        ))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_course_detail_rejects_malformed_id() {
    let response = test_app()
        .oneshot(get("/api/courses/not-a-uuid"))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_enrollment_detail_rejects_malformed_id() {
    let token = token_for(UserRole::Student);
    let response = test_app()
        .oneshot(get_with_auth(
            "/api/enrollments/not-a-uuid",
            &format!("Bearer {}", token),
        ))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_json_body_stays_in_the_error_envelope() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ this is not json"))
        .expect("Failed to build request");

    let response = test_app()
        .oneshot(request)
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_create_course_requires_admin() {
    let token = token_for(UserRole::Student);
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/courses",
            Some(&token),
            json!({ "title": "Sneaky Course" }),
        ))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_create_course_validates_required_fields() {
    let token = token_for(UserRole::Admin);
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/courses",
            Some(&token),
            json!({}),
        ))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_error(
        &body,
        "VALIDATION_ERROR",
        "Missing required fields: title, category, description, durationHours",
    );
}

#[tokio::test]
async fn test_create_course_rejects_unknown_category() {
    let token = token_for(UserRole::Admin);
    let payload = json!({
        "title": "Basket Weaving 101",
        "category": "Basket Weaving",
        "description": "Weave baskets",
        "durationHours": 10,
    });
    let response = test_app()
        .oneshot(json_request("POST", "/api/courses", Some(&token), payload))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_error(&body, "VALIDATION_ERROR", "Invalid category: Basket Weaving");
}

#[tokio::test]
async fn test_profile_update_validates_name() {
    let token = token_for(UserRole::Student);
    let response = test_app()
        .oneshot(json_request(
            "PUT",
            "/api/auth/profile",
            Some(&token),
            json!({ "name": " x " }),
        ))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_error(
        &body,
        "VALIDATION_ERROR",
        "name must be at least 2 characters",
    );
}

#[tokio::test]
async fn test_complete_module_requires_fields() {
    let token = token_for(UserRole::Student);
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/progress/complete",
            Some(&token),
            json!({ "courseId": Uuid::new_v4().to_string() }),
        ))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_error(
        &body,
        "VALIDATION_ERROR",
        "courseId and moduleId are required",
    );
}
