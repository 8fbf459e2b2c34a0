use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use super::error::{parse_body, ApiError};
use super::wellness_scores::{ensure_body_user_matches, ensure_user_exists};
use super::AppState;
use crate::models::{CreateRecommendation, Recommendation};

pub fn recommendation_routes() -> Router<AppState> {
    Router::new().route(
        "/users/:user_id/recommendations",
        get(get_recommendations).post(create_recommendation),
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationBody {
    pub user_id: Option<i32>,
    pub category: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "isHSAEligible")]
    pub is_hsa_eligible: bool,
    pub tag: Option<String>,
    pub icon: Option<String>,
}

pub async fn get_recommendations(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<Recommendation>>, ApiError> {
    Ok(Json(state.store.get_recommendations(user_id).await?))
}

pub async fn create_recommendation(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Recommendation>), ApiError> {
    let body: RecommendationBody = parse_body(body)?;
    ensure_body_user_matches(body.user_id, user_id)?;
    ensure_user_exists(&state, user_id).await?;

    let recommendation = state
        .store
        .create_recommendation(CreateRecommendation {
            user_id,
            category: body.category,
            title: body.title,
            description: body.description,
            is_hsa_eligible: body.is_hsa_eligible,
            tag: body.tag,
            icon: body.icon,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(recommendation)))
}
