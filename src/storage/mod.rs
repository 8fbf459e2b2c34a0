//! Storage seam for the wellness entities.
//!
//! The API layer only sees the [`Storage`] trait; [`MemStorage`] is the
//! single backing implementation. The store is intentionally non-persistent:
//! it is reinitialized with demo data on every process start.

pub mod memory;

pub use memory::MemStorage;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{
    ActionPlan, AssessmentResponse, ChatMessage, CreateActionPlan, CreateAssessmentResponse,
    CreateChatMessage, CreateHsaInfo, CreateRecommendation, CreateUser, CreateWellnessScore,
    HsaInfo, Recommendation, User, WellnessScore,
};

/// Backend-agnostic store covering all wellness entities.
///
/// Get/list operations return `Ok(None)` / `Ok(vec![])` for unknown keys.
/// Create operations assign a monotonically increasing integer id scoped per
/// entity type and return the full persisted record.
#[async_trait]
pub trait Storage: Send + Sync {
    // ── Users ───────────────────────────────────────────────────────

    async fn get_user(&self, id: i32) -> Result<Option<User>>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    async fn create_user(&self, user: CreateUser) -> Result<User>;

    // ── Wellness scores ─────────────────────────────────────────────

    async fn get_wellness_scores(&self, user_id: i32) -> Result<Vec<WellnessScore>>;

    /// The score with the maximum assessment date, `None` when the user has
    /// no scores yet.
    async fn get_latest_wellness_score(&self, user_id: i32) -> Result<Option<WellnessScore>>;

    async fn create_wellness_score(&self, score: CreateWellnessScore) -> Result<WellnessScore>;

    // ── HSA info ────────────────────────────────────────────────────

    async fn get_hsa_info(&self, user_id: i32) -> Result<Option<HsaInfo>>;

    /// Upsert by user id: create if absent, merge fields if present. The id
    /// of the first record is retained across updates.
    async fn create_or_update_hsa_info(&self, info: CreateHsaInfo) -> Result<HsaInfo>;

    // ── Recommendations ─────────────────────────────────────────────

    async fn get_recommendations(&self, user_id: i32) -> Result<Vec<Recommendation>>;

    async fn create_recommendation(
        &self,
        recommendation: CreateRecommendation,
    ) -> Result<Recommendation>;

    // ── Action plans ────────────────────────────────────────────────

    async fn get_action_plans(&self, user_id: i32) -> Result<Vec<ActionPlan>>;

    async fn create_action_plan(&self, plan: CreateActionPlan) -> Result<ActionPlan>;

    /// Locate a plan by its id across all users and set the `completed` flag
    /// of the task at `task_index`. An out-of-range index leaves the tasks
    /// unchanged; an unknown plan id yields `None`.
    async fn update_action_plan_task(
        &self,
        plan_id: i32,
        task_index: usize,
        completed: bool,
    ) -> Result<Option<ActionPlan>>;

    // ── Chat messages ───────────────────────────────────────────────

    /// Messages in ascending timestamp order; with a limit, the most recent
    /// N still in ascending order.
    async fn get_chat_messages(&self, user_id: i32, limit: Option<usize>)
        -> Result<Vec<ChatMessage>>;

    async fn create_chat_message(&self, message: CreateChatMessage) -> Result<ChatMessage>;

    // ── Assessment responses ────────────────────────────────────────

    async fn get_assessment_responses(&self, user_id: i32) -> Result<Vec<AssessmentResponse>>;

    async fn create_assessment_response(
        &self,
        response: CreateAssessmentResponse,
    ) -> Result<AssessmentResponse>;
}
