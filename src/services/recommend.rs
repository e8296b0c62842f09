use std::collections::HashSet;

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::ml::{MlClient, QuizSignal, RecommendationSignals};
use crate::models::{Course, RecommendationItem, RecommendationResponse};
use crate::services::catalog::{self, CourseFilter};

const FALLBACK_LIMIT: usize = 8;
const FALLBACK_REASON: &str = "Popular course recommended based on your profile.";
const FALLBACK_TOPICS: [&str; 3] = ["DSA", "DBMS", "System Design"];

/// Returns recommendations for the user.
///
/// With an ML client configured, the user's activity signals are sent to
/// the service and its JSON answer is passed through verbatim. Any failure
/// there (timeout, connection, bad status, bad body) logs a warning and
/// falls back to a local popularity ranking; the caller never sees an
/// ML error.
pub async fn recommendations_for(
    pool: &PgPool,
    ml: Option<&MlClient>,
    user_id: Uuid,
) -> Result<Value> {
    let enrolled: Vec<Uuid> =
        sqlx::query_scalar::<_, Uuid>("SELECT course_id FROM enrollments WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await?;

    if let Some(client) = ml {
        let signals = gather_signals(pool, user_id, enrolled.clone()).await?;
        match client.recommend(&signals).await {
            Ok(response) => return Ok(response),
            Err(e) => {
                tracing::warn!("ML recommendation failed, using local fallback: {:#}", e);
            }
        }
    }

    let courses = catalog::list_courses(pool, CourseFilter::default()).await?;
    let enrolled_set: HashSet<Uuid> = enrolled.into_iter().collect();
    let fallback = fallback_recommendations(courses, &enrolled_set);

    serde_json::to_value(fallback).map_err(|e| AppError::Internal(e.to_string()))
}

async fn gather_signals(
    pool: &PgPool,
    user_id: Uuid,
    enrolled_courses: Vec<Uuid>,
) -> Result<RecommendationSignals> {
    let completed_modules: Vec<String> = sqlx::query_scalar::<_, String>(
        "SELECT module_id FROM progress WHERE user_id = $1 AND completed = TRUE",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let attempts = sqlx::query_as::<_, (Uuid, i32, bool)>(
        "SELECT course_id, score, passed FROM quiz_attempts \
         WHERE user_id = $1 ORDER BY created_at ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(RecommendationSignals {
        user_id,
        enrolled_courses,
        completed_modules,
        quiz_attempts: attempts
            .into_iter()
            .map(|(course_id, score, passed)| QuizSignal {
                course_id,
                score,
                passed,
            })
            .collect(),
    })
}

/// Local ranking: highest-rated courses the user is not already enrolled
/// in, capped at eight, with a fixed topic list alongside.
pub fn fallback_recommendations(
    courses: Vec<Course>,
    enrolled: &HashSet<Uuid>,
) -> RecommendationResponse {
    let mut candidates: Vec<Course> = courses
        .into_iter()
        .filter(|course| !enrolled.contains(&course.id))
        .collect();

    // Sort by rating descending
    candidates.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let recommended_courses = candidates
        .into_iter()
        .take(FALLBACK_LIMIT)
        .map(|course| RecommendationItem {
            course_id: course.id,
            title: course.title,
            score: course.rating,
            reason: FALLBACK_REASON.to_string(),
        })
        .collect();

    RecommendationResponse {
        recommended_courses,
        recommended_topics: FALLBACK_TOPICS.iter().map(|t| t.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseCategory, CourseLevel};
    use chrono::Utc;
    use sqlx::types::Json;

    fn create_test_course(title: &str, rating: f64) -> Course {
        Course {
            id: Uuid::new_v4(),
            title: title.to_string(),
            slug: catalog::derive_slug(title),
            category: CourseCategory::Dsa,
            level: CourseLevel::Beginner,
            duration_hours: 10,
            rating,
            thumbnail_url: "https://example.com/thumb.png".to_string(),
            description: format!("About {}", title),
            tags: Vec::new(),
            syllabus_modules: Json(Vec::new()),
            prerequisites: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_fallback_excludes_enrolled_courses() {
        let enrolled_course = create_test_course("Already Taken", 5.0);
        let other = create_test_course("Fresh Pick", 3.0);
        let enrolled: HashSet<Uuid> = [enrolled_course.id].into_iter().collect();

        let response = fallback_recommendations(vec![enrolled_course, other], &enrolled);

        assert_eq!(response.recommended_courses.len(), 1);
        assert_eq!(response.recommended_courses[0].title, "Fresh Pick");
    }

    #[test]
    fn test_fallback_orders_by_rating_and_caps_at_eight() {
        let courses: Vec<Course> = (0..12)
            .map(|i| create_test_course(&format!("Course {}", i), f64::from(i) * 0.4))
            .collect();

        let response = fallback_recommendations(courses, &HashSet::new());

        assert_eq!(response.recommended_courses.len(), 8);
        for pair in response.recommended_courses.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_fallback_carries_reason_and_topics() {
        let response =
            fallback_recommendations(vec![create_test_course("Solo", 4.2)], &HashSet::new());

        assert_eq!(response.recommended_courses[0].score, 4.2);
        assert_eq!(response.recommended_courses[0].reason, FALLBACK_REASON);
        assert_eq!(
            response.recommended_topics,
            vec!["DSA", "DBMS", "System Design"]
        );
    }

    #[test]
    fn test_fallback_envelope_matches_ml_service_keys() {
        let response =
            fallback_recommendations(vec![create_test_course("Solo", 4.2)], &HashSet::new());
        let value = serde_json::to_value(&response).expect("response should serialize");

        assert!(value.get("recommendedCourses").is_some());
        assert!(value.get("recommendedTopics").is_some());
        assert!(value.get("recommendations").is_none());

        let first = &value["recommendedCourses"][0];
        assert!(first.get("courseId").is_some());
        assert_eq!(first["title"], "Solo");
        assert_eq!(first["reason"], FALLBACK_REASON);
    }
}
