use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::Course;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub module_id: String,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub module_id: String,
    pub score: i32,
    pub time_taken_sec: i32,
    pub passed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteModuleRequest {
    pub course_id: Option<String>,
    pub module_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    pub course_id: Option<String>,
    pub module_id: Option<String>,
    pub answers: Option<serde_json::Value>,
    pub time_taken_sec: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub score: i32,
    pub passed: bool,
    pub feedback: String,
    pub attempt: QuizAttempt,
}

/// Per-course completion rollup for one user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgressSummary {
    pub course: Course,
    pub total_modules: usize,
    pub completed_modules: usize,
    pub completion_percentage: f64,
    pub modules: Vec<Progress>,
}

#[derive(Debug, Serialize)]
pub struct ProgressSummaryResponse {
    pub count: usize,
    pub summary: Vec<CourseProgressSummary>,
}
