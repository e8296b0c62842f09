use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationItem {
    pub course_id: Uuid,
    pub title: String,
    pub score: f64,
    pub reason: String,
}

/// Serialized with the same keys the ML service answers with, so the
/// caller sees one shape whichever path produced it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub recommended_courses: Vec<RecommendationItem>,
    pub recommended_topics: Vec<String>,
}
