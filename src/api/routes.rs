use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::action_plans::action_plan_routes;
use super::assessment::assessment_routes;
use super::assessment_responses::assessment_response_routes;
use super::chat_messages::chat_message_routes;
use super::generation::generation_routes;
use super::health::health_check;
use super::hsa_info::hsa_info_routes;
use super::recommendations::recommendation_routes;
use super::sample_data::sample_data_routes;
use super::users::user_routes;
use super::wellness_scores::wellness_score_routes;
use super::AppState;

pub fn create_routes(state: AppState) -> Router {
    let api = Router::new()
        .merge(user_routes())
        .merge(wellness_score_routes())
        .merge(hsa_info_routes())
        .merge(recommendation_routes())
        .merge(action_plan_routes())
        .merge(chat_message_routes())
        .merge(assessment_response_routes())
        .merge(assessment_routes())
        .merge(generation_routes())
        .merge(sample_data_routes());

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
