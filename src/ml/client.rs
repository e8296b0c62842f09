use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

#[derive(Clone)]
pub struct MlClient {
    http_client: Client,
    base_url: String,
}

impl MlClient {
    pub fn new(base_url: &str, timeout_ms: u64) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .context("Failed to build ML service HTTP client")?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Asks the recommendation service to rank courses for one user.
    ///
    /// The response body is returned verbatim; callers decide how to react
    /// to a failure (the API falls back to a local ranking).
    pub async fn recommend(&self, signals: &RecommendationSignals) -> Result<serde_json::Value> {
        let url = format!("{}/recommend", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(signals)
            .send()
            .await
            .context("Failed to call ML recommendation service")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "ML recommendation service failed with status {}: {}",
                status,
                error_text
            );
        }

        response
            .json()
            .await
            .context("Failed to parse ML recommendation response")
    }
}

/// Activity signals sent to the ML service.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSignals {
    pub user_id: Uuid,
    pub enrolled_courses: Vec<Uuid>,
    pub completed_modules: Vec<String>,
    pub quiz_attempts: Vec<QuizSignal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSignal {
    pub course_id: Uuid,
    pub score: i32,
    pub passed: bool,
}
