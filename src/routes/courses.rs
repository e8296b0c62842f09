use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;

use crate::{
    auth::{authz, JwtClaims},
    errors::Result,
    models::{CourseListResponse, CreateCourseRequest, ListCoursesQuery},
    routes::extract::AppJson,
    services::catalog::{self, CourseFilter},
    state::AppState,
};

/// List the catalog. Filters and sort come from query params and are
/// parsed leniently.
pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<ListCoursesQuery>,
) -> Result<impl IntoResponse> {
    let courses = catalog::list_courses(&state.pool, CourseFilter::from(query)).await?;

    Ok(Json(CourseListResponse {
        count: courses.len(),
        courses,
    }))
}

/// Course detail with prerequisite courses resolved. The id is parsed by
/// hand so a malformed one answers in the error envelope.
pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<impl IntoResponse> {
    let course_id = Uuid::parse_str(&course_id)?;
    let course = catalog::get_course(&state.pool, course_id).await?;
    Ok(Json(course))
}

/// Create a course (admin only)
pub async fn create_course(
    Extension(claims): Extension<JwtClaims>,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateCourseRequest>,
) -> Result<impl IntoResponse> {
    authz::require_admin(&claims).await?;

    let course = catalog::create_course(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(course)))
}
