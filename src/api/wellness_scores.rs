use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use super::error::{invalid, parse_body, ApiError};
use super::AppState;
use crate::models::{validate_score, CreateWellnessScore, WellnessScore};

pub fn wellness_score_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/:user_id/wellness-scores",
            get(get_wellness_scores).post(create_wellness_score),
        )
        .route(
            "/users/:user_id/wellness-scores/latest",
            get(get_latest_wellness_score),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellnessScoreBody {
    pub user_id: Option<i32>,
    pub physical: i32,
    pub mental: i32,
    pub sleep: i32,
    pub stress: i32,
    pub nutrition: i32,
    pub overall_score: i32,
}

pub async fn get_wellness_scores(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<WellnessScore>>, ApiError> {
    Ok(Json(state.store.get_wellness_scores(user_id).await?))
}

pub async fn get_latest_wellness_score(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<WellnessScore>, ApiError> {
    let score = state
        .store
        .get_latest_wellness_score(user_id)
        .await?
        .ok_or(ApiError::NotFound("No wellness scores found"))?;

    Ok(Json(score))
}

pub async fn create_wellness_score(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<WellnessScore>), ApiError> {
    let body: WellnessScoreBody = parse_body(body)?;
    ensure_body_user_matches(body.user_id, user_id)?;
    ensure_user_exists(&state, user_id).await?;

    for (value, field) in [
        (body.physical, "physical"),
        (body.mental, "mental"),
        (body.sleep, "sleep"),
        (body.stress, "stress"),
        (body.nutrition, "nutrition"),
        (body.overall_score, "overallScore"),
    ] {
        validate_score(value, field).map_err(invalid)?;
    }

    let score = state
        .store
        .create_wellness_score(CreateWellnessScore {
            user_id,
            physical: body.physical,
            mental: body.mental,
            sleep: body.sleep,
            stress: body.stress,
            nutrition: body.nutrition,
            overall_score: body.overall_score,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(score)))
}

/// A body-supplied userId must agree with the path it was posted to.
pub(super) fn ensure_body_user_matches(
    body_user_id: Option<i32>,
    path_user_id: i32,
) -> Result<(), ApiError> {
    match body_user_id {
        Some(id) if id != path_user_id => Err(ApiError::InvalidRequest(
            "userId in body does not match the request path".to_string(),
        )),
        _ => Ok(()),
    }
}

/// User-scoped creates enforce the referential invariant.
pub(super) async fn ensure_user_exists(state: &AppState, user_id: i32) -> Result<(), ApiError> {
    state
        .store
        .get_user(user_id)
        .await?
        .map(|_| ())
        .ok_or(ApiError::NotFound("User not found"))
}
