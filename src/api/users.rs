use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use super::error::ApiError;
use super::AppState;
use crate::models::UserResponse;

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users/:id", get(get_user))
}

/// Fetch a user profile. The password field is stripped from the response.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .store
        .get_user(id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;

    Ok(Json(user.into()))
}
