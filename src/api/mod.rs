// API routes and handlers

pub mod action_plans;
pub mod assessment;
pub mod assessment_responses;
pub mod chat_messages;
pub mod error;
pub mod generation;
pub mod health;
pub mod hsa_info;
pub mod recommendations;
pub mod routes;
pub mod sample_data;
pub mod users;
pub mod wellness_scores;

use std::sync::Arc;

use crate::services::{AssessmentPipelineService, GenerationService};
use crate::storage::Storage;

/// Shared handler state: the store plus the generation-facing services.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Storage>,
    pub generation: Arc<GenerationService>,
    pub pipeline: Arc<AssessmentPipelineService>,
}
