use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use super::error::{invalid, parse_body, ApiError};
use super::wellness_scores::{ensure_body_user_matches, ensure_user_exists};
use super::AppState;
use crate::models::{validate_amount, CreateHsaInfo, HsaInfo};

pub fn hsa_info_routes() -> Router<AppState> {
    Router::new().route(
        "/users/:user_id/hsa-info",
        get(get_hsa_info).post(upsert_hsa_info),
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HsaInfoBody {
    pub user_id: Option<i32>,
    pub balance: f64,
    pub annual_limit: f64,
    pub tax_savings: Option<f64>,
}

pub async fn get_hsa_info(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<HsaInfo>, ApiError> {
    let info = state
        .store
        .get_hsa_info(user_id)
        .await?
        .ok_or(ApiError::NotFound("HSA information not found"))?;

    Ok(Json(info))
}

/// POST upserts: create on first call, merge fields on subsequent calls.
pub async fn upsert_hsa_info(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<HsaInfo>), ApiError> {
    let body: HsaInfoBody = parse_body(body)?;
    ensure_body_user_matches(body.user_id, user_id)?;
    ensure_user_exists(&state, user_id).await?;

    validate_amount(body.balance, "balance").map_err(invalid)?;
    validate_amount(body.annual_limit, "annualLimit").map_err(invalid)?;
    if let Some(tax_savings) = body.tax_savings {
        validate_amount(tax_savings, "taxSavings").map_err(invalid)?;
    }

    let info = state
        .store
        .create_or_update_hsa_info(CreateHsaInfo {
            user_id,
            balance: body.balance,
            annual_limit: body.annual_limit,
            tax_savings: body.tax_savings,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(info)))
}
