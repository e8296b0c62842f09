pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod extract;
pub mod health;
pub mod progress;
pub mod recommendations;

use axum::{http::StatusCode, middleware, response::IntoResponse, Json, Router};
use serde_json::json;

use crate::state::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes(state))
        .fallback(not_found)
}

/// API routes under /api prefix
fn api_routes(state: AppState) -> Router {
    // Public routes
    let public = Router::new()
        .merge(health::routes())
        .route("/auth/register", axum::routing::post(auth::register))
        .route("/auth/login", axum::routing::post(auth::login))
        .route("/courses", axum::routing::get(courses::list_courses))
        .route("/courses/:id", axum::routing::get(courses::get_course));

    // Protected routes (require authentication)
    let protected = Router::new()
        .route("/auth/me", axum::routing::get(auth::me))
        .route("/auth/profile", axum::routing::put(auth::update_profile))
        // Catalog management
        .route("/courses", axum::routing::post(courses::create_course))
        // Enrollment routes
        .route("/enrollments", axum::routing::post(enrollments::enroll))
        .route(
            "/enrollments/me",
            axum::routing::get(enrollments::list_my_enrollments),
        )
        .route(
            "/enrollments/:id",
            axum::routing::get(enrollments::get_enrollment),
        )
        // Progress and quiz routes
        .route(
            "/progress/complete",
            axum::routing::post(progress::complete_module),
        )
        .route("/progress/me", axum::routing::get(progress::my_progress))
        .route("/quiz/submit", axum::routing::post(progress::submit_quiz))
        // Recommendations
        .route(
            "/recommendations/me",
            axum::routing::get(recommendations::my_recommendations),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            crate::auth::middleware::auth_required,
        ));

    public.merge(protected).with_state(state)
}

/// JSON 404 for anything outside the API surface
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": {
                "code": "NOT_FOUND",
                "message": "Route not found",
            }
        })),
    )
}
