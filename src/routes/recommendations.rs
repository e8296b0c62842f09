use axum::{extract::State, response::IntoResponse, Extension, Json};
use uuid::Uuid;

use crate::{auth::JwtClaims, errors::Result, services::recommend, state::AppState};

/// Recommendations for the caller, ML-backed when configured
pub async fn my_recommendations(
    Extension(claims): Extension<JwtClaims>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let user_id = Uuid::parse_str(&claims.sub)?;
    let recommendations =
        recommend::recommendations_for(&state.pool, state.ml.as_ref(), user_id).await?;

    Ok(Json(recommendations))
}
