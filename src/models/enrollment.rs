use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::{Course, UserResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "enrollment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Active,
    Completed,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub status: EnrollmentStatus,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    pub course_id: Option<String>,
}

/// Enrollment with its course resolved, for listings. The resolved entity
/// rides under the reference key clients already read.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentWithCourse {
    pub id: Uuid,
    #[serde(rename = "courseId")]
    pub course: Course,
    pub status: EnrollmentStatus,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct EnrollmentListResponse {
    pub count: usize,
    pub enrollments: Vec<EnrollmentWithCourse>,
}

/// Single enrollment with both sides resolved.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDetail {
    pub id: Uuid,
    #[serde(rename = "userId")]
    pub user: UserResponse,
    #[serde(rename = "courseId")]
    pub course: Course,
    pub status: EnrollmentStatus,
    pub enrolled_at: DateTime<Utc>,
}
