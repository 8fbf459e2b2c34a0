use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use super::error::{invalid, parse_body, ApiError};
use super::wellness_scores::{ensure_body_user_matches, ensure_user_exists};
use super::AppState;
use crate::models::{validate_week_count, ActionPlan, ActionPlanTask, CreateActionPlan};

pub fn action_plan_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/:user_id/action-plans",
            get(get_action_plans).post(create_action_plan),
        )
        .route(
            "/action-plans/:id/tasks/:task_index",
            patch(update_action_plan_task),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlanBody {
    pub user_id: Option<i32>,
    pub week_number: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub tasks: Vec<ActionPlanTask>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskBody {
    pub completed: bool,
}

pub async fn get_action_plans(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<ActionPlan>>, ApiError> {
    Ok(Json(state.store.get_action_plans(user_id).await?))
}

pub async fn create_action_plan(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<ActionPlan>), ApiError> {
    let body: ActionPlanBody = parse_body(body)?;
    ensure_body_user_matches(body.user_id, user_id)?;
    ensure_user_exists(&state, user_id).await?;
    validate_week_count(body.week_number).map_err(invalid)?;

    let plan = state
        .store
        .create_action_plan(CreateActionPlan {
            user_id,
            week_number: body.week_number,
            start_date: body.start_date,
            end_date: body.end_date,
            tasks: body.tasks,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(plan)))
}

/// Toggle one task's completion flag. The plan is addressed by id alone; an
/// out-of-range task index returns the plan unchanged.
pub async fn update_action_plan_task(
    State(state): State<AppState>,
    Path((id, task_index)): Path<(i32, usize)>,
    Json(body): Json<Value>,
) -> Result<Json<ActionPlan>, ApiError> {
    let body: UpdateTaskBody = parse_body(body)?;

    let plan = state
        .store
        .update_action_plan_task(id, task_index, body.completed)
        .await?
        .ok_or(ApiError::NotFound("Action plan not found"))?;

    Ok(Json(plan))
}
