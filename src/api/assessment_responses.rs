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
use crate::models::{AssessmentResponse, CreateAssessmentResponse};

pub fn assessment_response_routes() -> Router<AppState> {
    Router::new().route(
        "/users/:user_id/assessment-responses",
        get(get_assessment_responses).post(create_assessment_response),
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResponseBody {
    pub user_id: Option<i32>,
    pub question_id: String,
    pub response: String,
}

pub async fn get_assessment_responses(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<AssessmentResponse>>, ApiError> {
    Ok(Json(state.store.get_assessment_responses(user_id).await?))
}

pub async fn create_assessment_response(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<AssessmentResponse>), ApiError> {
    let body: AssessmentResponseBody = parse_body(body)?;
    ensure_body_user_matches(body.user_id, user_id)?;
    ensure_user_exists(&state, user_id).await?;

    let response = state
        .store
        .create_assessment_response(CreateAssessmentResponse {
            user_id,
            question_id: body.question_id,
            response: body.response,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(response)))
}
