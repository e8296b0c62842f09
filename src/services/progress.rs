use std::collections::HashMap;

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::{Course, CourseProgressSummary, Progress, QuizAttempt, QuizResult};
use crate::services::{catalog, enrollment};

const POINTS_PER_ANSWER: i32 = 10;
const MAX_SCORE: i32 = 100;
const PASS_MARK: i32 = 60;

const PASS_FEEDBACK: &str = "Great job!";
const FAIL_FEEDBACK: &str = "Try again to improve your score.";

const PROGRESS_COLUMNS: &str =
    "id, user_id, course_id, module_id, completed, completed_at, created_at";

/// Marks one module of a course complete for the user.
///
/// The upsert is atomic on (user_id, course_id, module_id) and idempotent:
/// a module that is already complete keeps its original completed_at.
pub async fn mark_module_complete(
    pool: &PgPool,
    user_id: Uuid,
    course_id: Uuid,
    module_id: &str,
) -> Result<Progress> {
    enrollment::assert_enrolled(pool, user_id, course_id).await?;

    let progress = sqlx::query_as::<_, Progress>(&completion_upsert_sql())
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(course_id)
        .bind(module_id)
        .fetch_one(pool)
        .await?;

    Ok(progress)
}

fn completion_upsert_sql() -> String {
    format!(
        "INSERT INTO progress (id, user_id, course_id, module_id, completed, completed_at) \
         VALUES ($1, $2, $3, $4, TRUE, now()) \
         ON CONFLICT (user_id, course_id, module_id) DO UPDATE SET \
             completed = TRUE, \
             completed_at = CASE WHEN progress.completed THEN progress.completed_at \
                                 ELSE excluded.completed_at END \
         RETURNING {PROGRESS_COLUMNS}"
    )
}

/// Groups the user's progress records by course, in first-touch order.
///
/// The completion percentage is over modules the user has a record for,
/// not the length of the syllabus.
pub async fn my_progress(pool: &PgPool, user_id: Uuid) -> Result<Vec<CourseProgressSummary>> {
    let records = sqlx::query_as::<_, Progress>(&format!(
        "SELECT {PROGRESS_COLUMNS} FROM progress \
         WHERE user_id = $1 ORDER BY created_at ASC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let mut order: Vec<Uuid> = Vec::new();
    let mut grouped: HashMap<Uuid, Vec<Progress>> = HashMap::new();
    for record in records {
        if !grouped.contains_key(&record.course_id) {
            order.push(record.course_id);
        }
        grouped.entry(record.course_id).or_default().push(record);
    }

    let courses = catalog::courses_by_ids(pool, &order).await?;
    let mut courses_by_id: HashMap<Uuid, Course> =
        courses.into_iter().map(|c| (c.id, c)).collect();

    let mut summary = Vec::with_capacity(order.len());
    for course_id in order {
        let Some(course) = courses_by_id.remove(&course_id) else {
            continue;
        };
        let modules = grouped.remove(&course_id).unwrap_or_default();
        let total = modules.len();
        let completed = modules.iter().filter(|m| m.completed).count();
        summary.push(CourseProgressSummary {
            course,
            total_modules: total,
            completed_modules: completed,
            completion_percentage: completion_percentage(completed, total),
            modules,
        });
    }

    Ok(summary)
}

/// Scores a quiz submission and records the attempt. Every submission
/// inserts a new attempt; history is never overwritten.
pub async fn submit_quiz(
    pool: &PgPool,
    user_id: Uuid,
    course_id: Uuid,
    module_id: &str,
    answers: &Value,
    time_taken_sec: i32,
) -> Result<QuizResult> {
    let Some(items) = answers.as_array() else {
        return Err(AppError::Validation("answers must be an array".to_string()));
    };

    enrollment::assert_enrolled(pool, user_id, course_id).await?;

    let score = score_answers(items);
    let passed = score >= PASS_MARK;

    let attempt = sqlx::query_as::<_, QuizAttempt>(
        "INSERT INTO quiz_attempts (id, user_id, course_id, module_id, score, time_taken_sec, passed) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING id, user_id, course_id, module_id, score, time_taken_sec, passed, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(course_id)
    .bind(module_id)
    .bind(score)
    .bind(time_taken_sec)
    .bind(passed)
    .fetch_one(pool)
    .await?;

    let feedback = if passed { PASS_FEEDBACK } else { FAIL_FEEDBACK };

    Ok(QuizResult {
        score,
        passed,
        feedback: feedback.to_string(),
        attempt,
    })
}

/// Ten points per answered question, capped at 100. An answer counts when
/// its JSON value is truthy.
fn score_answers(answers: &[Value]) -> i32 {
    let answered = answers.iter().filter(|a| is_truthy(a)).count() as i32;
    (answered * POINTS_PER_ANSWER).min(MAX_SCORE)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn completion_percentage(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (completed as f64 / total as f64 * 10_000.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_score_three_of_six() {
        let answers = vec![
            json!(true),
            json!(true),
            json!(true),
            json!(false),
            json!(false),
            json!(false),
        ];
        let score = score_answers(&answers);
        assert_eq!(score, 30);
        assert!(score < PASS_MARK);
    }

    #[test]
    fn test_score_seven_passes() {
        let answers: Vec<Value> = (0..7).map(|i| json!(format!("answer {}", i))).collect();
        let score = score_answers(&answers);
        assert_eq!(score, 70);
        assert!(score >= PASS_MARK);
    }

    #[test]
    fn test_score_caps_at_one_hundred() {
        let answers: Vec<Value> = (0..11).map(|_| json!(true)).collect();
        assert_eq!(score_answers(&answers), 100);
    }

    #[test]
    fn test_score_empty_is_zero() {
        assert_eq!(score_answers(&[]), 0);
    }

    #[test]
    fn test_truthiness_follows_json_semantics() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!("a")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_completion_percentage_rounds_to_two_decimals() {
        assert_eq!(completion_percentage(2, 3), 66.67);
        assert_eq!(completion_percentage(3, 3), 100.0);
        assert_eq!(completion_percentage(0, 0), 0.0);
    }

    // The conflict action must land on the module key and never move an
    // already-set completion timestamp.
    #[test]
    fn test_completion_upsert_keeps_the_first_timestamp() {
        let sql = completion_upsert_sql();
        assert!(sql.contains("ON CONFLICT (user_id, course_id, module_id)"));
        assert!(sql.contains("CASE WHEN progress.completed THEN progress.completed_at"));
        assert!(sql.contains("ELSE excluded.completed_at"));
    }
}
