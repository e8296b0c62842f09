use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use uuid::Uuid;

use crate::{
    auth::JwtClaims,
    errors::{AppError, Result},
    models::{CompleteModuleRequest, ProgressSummaryResponse, SubmitQuizRequest},
    routes::extract::AppJson,
    services::progress,
    state::AppState,
};

/// Mark one module of a course complete for the caller
pub async fn complete_module(
    Extension(claims): Extension<JwtClaims>,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CompleteModuleRequest>,
) -> Result<impl IntoResponse> {
    let user_id = Uuid::parse_str(&claims.sub)?;

    let course_id = payload
        .course_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let module_id = payload
        .module_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let (Some(course_id), Some(module_id)) = (course_id, module_id) else {
        return Err(AppError::Validation(
            "courseId and moduleId are required".to_string(),
        ));
    };
    let course_id = Uuid::parse_str(course_id)?;

    let record =
        progress::mark_module_complete(&state.pool, user_id, course_id, module_id).await?;
    Ok(Json(record))
}

/// The caller's progress grouped by course
pub async fn my_progress(
    Extension(claims): Extension<JwtClaims>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let user_id = Uuid::parse_str(&claims.sub)?;
    let summary = progress::my_progress(&state.pool, user_id).await?;

    Ok(Json(ProgressSummaryResponse {
        count: summary.len(),
        summary,
    }))
}

/// Score a quiz submission and record the attempt
pub async fn submit_quiz(
    Extension(claims): Extension<JwtClaims>,
    State(state): State<AppState>,
    AppJson(payload): AppJson<SubmitQuizRequest>,
) -> Result<impl IntoResponse> {
    let user_id = Uuid::parse_str(&claims.sub)?;

    let course_id = payload
        .course_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let module_id = payload
        .module_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let (Some(course_id), Some(module_id), Some(answers)) =
        (course_id, module_id, payload.answers.as_ref())
    else {
        return Err(AppError::Validation(
            "courseId, moduleId, and answers are required".to_string(),
        ));
    };
    let course_id = Uuid::parse_str(course_id)?;

    let result = progress::submit_quiz(
        &state.pool,
        user_id,
        course_id,
        module_id,
        answers,
        payload.time_taken_sec.unwrap_or(0),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(result)))
}
