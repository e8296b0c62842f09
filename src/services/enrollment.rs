use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::{conflict_on_unique, AppError, Result};
use crate::models::{
    Course, Enrollment, EnrollmentDetail, EnrollmentWithCourse, User,
};
use crate::services::catalog;

const ALREADY_ENROLLED: &str = "Already enrolled in this course";

const ENROLLMENT_COLUMNS: &str = "id, user_id, course_id, status, enrolled_at";

/// Enrolls a user in a course.
///
/// The existence check gives the friendly conflict on the common path; two
/// racing requests can both pass it, so the unique constraint on
/// (user_id, course_id) decides the winner and the loser maps to the same
/// conflict.
pub async fn enroll(pool: &PgPool, user_id: Uuid, course_id: Uuid) -> Result<Enrollment> {
    let course_exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
            .bind(course_id)
            .fetch_one(pool)
            .await?;

    if !course_exists {
        return Err(AppError::NotFound("Course not found".to_string()));
    }

    let already_enrolled = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM enrollments WHERE user_id = $1 AND course_id = $2)",
    )
    .bind(user_id)
    .bind(course_id)
    .fetch_one(pool)
    .await?;

    if already_enrolled {
        return Err(AppError::Conflict(ALREADY_ENROLLED.to_string()));
    }

    let enrollment = sqlx::query_as::<_, Enrollment>(&format!(
        "INSERT INTO enrollments (id, user_id, course_id) VALUES ($1, $2, $3) \
         RETURNING {ENROLLMENT_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(course_id)
    .fetch_one(pool)
    .await
    .map_err(|e| conflict_on_unique(e, ALREADY_ENROLLED))?;

    Ok(enrollment)
}

/// Lists the caller's enrollments, newest first, with courses resolved.
pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<EnrollmentWithCourse>> {
    let enrollments = sqlx::query_as::<_, Enrollment>(&format!(
        "SELECT {ENROLLMENT_COLUMNS} FROM enrollments \
         WHERE user_id = $1 ORDER BY enrolled_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let course_ids: Vec<Uuid> = enrollments.iter().map(|e| e.course_id).collect();
    let courses = catalog::courses_by_ids(pool, &course_ids).await?;
    let mut by_id: HashMap<Uuid, Course> = courses.into_iter().map(|c| (c.id, c)).collect();

    let list = enrollments
        .into_iter()
        .filter_map(|e| {
            by_id.remove(&e.course_id).map(|course| EnrollmentWithCourse {
                id: e.id,
                course,
                status: e.status,
                enrolled_at: e.enrolled_at,
            })
        })
        .collect();

    Ok(list)
}

/// Fetches one enrollment with course and user resolved. Only the owner
/// may see it.
pub async fn get_details(
    pool: &PgPool,
    enrollment_id: Uuid,
    caller_id: Uuid,
) -> Result<EnrollmentDetail> {
    let enrollment = sqlx::query_as::<_, Enrollment>(&format!(
        "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE id = $1"
    ))
    .bind(enrollment_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Enrollment not found".to_string()))?;

    if enrollment.user_id != caller_id {
        return Err(AppError::Forbidden(
            "You do not have access to this enrollment".to_string(),
        ));
    }

    let course = sqlx::query_as::<_, Course>(&format!(
        "SELECT {columns} FROM courses WHERE id = $1",
        columns = catalog::COURSE_COLUMNS
    ))
    .bind(enrollment.course_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, password_hash, role, created_at, last_activity_at \
         FROM users WHERE id = $1",
    )
    .bind(enrollment.user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(EnrollmentDetail {
        id: enrollment.id,
        user: user.into(),
        course,
        status: enrollment.status,
        enrolled_at: enrollment.enrolled_at,
    })
}

/// Errors with Forbidden unless the user holds an enrollment for the course.
pub(crate) async fn assert_enrolled(pool: &PgPool, user_id: Uuid, course_id: Uuid) -> Result<()> {
    let enrolled = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM enrollments WHERE user_id = $1 AND course_id = $2)",
    )
    .bind(user_id)
    .bind(course_id)
    .fetch_one(pool)
    .await?;

    if enrolled {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Not enrolled in this course".to_string(),
        ))
    }
}
