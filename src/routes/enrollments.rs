use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;

use crate::{
    auth::JwtClaims,
    errors::{AppError, Result},
    models::{EnrollRequest, EnrollmentListResponse},
    routes::extract::AppJson,
    services::enrollment,
    state::AppState,
};

/// Enroll the caller in a course
pub async fn enroll(
    Extension(claims): Extension<JwtClaims>,
    State(state): State<AppState>,
    AppJson(payload): AppJson<EnrollRequest>,
) -> Result<impl IntoResponse> {
    let user_id = Uuid::parse_str(&claims.sub)?;

    let course_id = match payload
        .course_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        Some(raw) => Uuid::parse_str(raw)?,
        None => {
            return Err(AppError::Validation("courseId is required".to_string()));
        }
    };

    let created = enrollment::enroll(&state.pool, user_id, course_id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List the caller's enrollments, newest first
pub async fn list_my_enrollments(
    Extension(claims): Extension<JwtClaims>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let user_id = Uuid::parse_str(&claims.sub)?;
    let enrollments = enrollment::list_for_user(&state.pool, user_id).await?;

    Ok(Json(EnrollmentListResponse {
        count: enrollments.len(),
        enrollments,
    }))
}

/// One enrollment with course and user resolved; owner only. The id is
/// parsed by hand so a malformed one answers in the error envelope.
pub async fn get_enrollment(
    Extension(claims): Extension<JwtClaims>,
    State(state): State<AppState>,
    Path(enrollment_id): Path<String>,
) -> Result<impl IntoResponse> {
    let user_id = Uuid::parse_str(&claims.sub)?;
    let enrollment_id = Uuid::parse_str(&enrollment_id)?;
    let detail = enrollment::get_details(&state.pool, enrollment_id, user_id).await?;
    Ok(Json(detail))
}
