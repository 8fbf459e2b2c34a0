use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use super::error::{invalid, parse_body, ApiError};
use super::AppState;
use crate::models::{
    validate_chat_role, validate_completion_role, validate_week_count, AssessmentAnswer,
    ConversationMessage, CreateActionPlan, CreateChatMessage, CreateHsaInfo,
    CreateRecommendation, CreateWellnessScore, GeneratedRecommendation, HsaOptimization,
    HsaSnapshot, PlanWeek, RecommendationSummary, ScoreSet, WellnessAnalysis,
};

/// Endpoints that call the generation service and persist its output. Each
/// returns the generation result, not the persisted records.
pub fn generation_routes() -> Router<AppState> {
    Router::new()
        .route("/chat/completions", post(chat_completions))
        .route("/generate/recommendations", post(generate_recommendations))
        .route("/generate/action-plan", post(generate_action_plan))
        .route("/analyze/wellness-score", post(analyze_wellness_score))
        .route("/optimize/hsa", post(optimize_hsa))
        .route("/abby/response", post(abby_response))
}

fn ensure_user_id(user_id: i32) -> Result<(), ApiError> {
    if user_id < 1 {
        return Err(ApiError::InvalidRequest(
            "Invalid request format".to_string(),
        ));
    }
    Ok(())
}

// ── Chat completions ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatCompletionsBody {
    pub user_id: i32,
    pub messages: Vec<ConversationMessage>,
}

#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub content: Option<String>,
}

pub async fn chat_completions(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<CompletionResponse>, ApiError> {
    let body: ChatCompletionsBody = parse_body(body)?;
    ensure_user_id(body.user_id)?;
    for message in &body.messages {
        validate_completion_role(&message.role).map_err(invalid)?;
    }

    let content = state
        .generation
        .chat_completion(&body.messages)
        .await
        .map_err(|e| {
            error!("Chat completion failed: {e:#}");
            ApiError::Generation(e)
        })?;

    Ok(Json(CompletionResponse { content }))
}

// ── Recommendations ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRecommendationsBody {
    pub user_id: i32,
    pub wellness_scores: ScoreSet,
}

#[derive(Debug, Serialize)]
pub struct GeneratedRecommendationsResponse {
    pub recommendations: Vec<GeneratedRecommendation>,
}

pub async fn generate_recommendations(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<GeneratedRecommendationsResponse>, ApiError> {
    let body: GenerateRecommendationsBody = parse_body(body)?;
    ensure_user_id(body.user_id)?;

    let recommendations = state
        .generation
        .generate_recommendations(&body.wellness_scores)
        .await
        .map_err(|e| {
            error!("Recommendation generation failed: {e:#}");
            ApiError::Generation(e)
        })?;

    for rec in &recommendations {
        state
            .store
            .create_recommendation(CreateRecommendation {
                user_id: body.user_id,
                category: rec.category.clone(),
                title: rec.title.clone(),
                description: rec.description.clone(),
                is_hsa_eligible: rec.is_hsa_eligible,
                tag: rec.tag.clone(),
                icon: rec.icon.clone(),
            })
            .await?;
    }

    Ok(Json(GeneratedRecommendationsResponse { recommendations }))
}

// ── Action plan ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateActionPlanBody {
    pub user_id: i32,
    pub recommendations: Vec<RecommendationSummary>,
    pub week_count: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedActionPlanResponse {
    pub action_plan: Vec<PlanWeek>,
}

pub async fn generate_action_plan(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<GeneratedActionPlanResponse>, ApiError> {
    let body: GenerateActionPlanBody = parse_body(body)?;
    ensure_user_id(body.user_id)?;
    let week_count = body.week_count.unwrap_or(4);
    validate_week_count(week_count).map_err(invalid)?;

    let weeks = state
        .generation
        .generate_action_plan(&body.recommendations, week_count)
        .await
        .map_err(|e| {
            error!("Action plan generation failed: {e:#}");
            ApiError::Generation(e)
        })?;

    for week in &weeks {
        state
            .store
            .create_action_plan(CreateActionPlan {
                user_id: body.user_id,
                week_number: week.week_number,
                start_date: week.start_date,
                end_date: week.end_date,
                tasks: week
                    .tasks
                    .iter()
                    .map(|task| crate::models::ActionPlanTask {
                        description: task.description.clone(),
                        completed: task.completed,
                    })
                    .collect(),
            })
            .await?;
    }

    Ok(Json(GeneratedActionPlanResponse { action_plan: weeks }))
}

// ── Wellness score analysis ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeWellnessScoreBody {
    pub user_id: i32,
    pub assessment_responses: Vec<AssessmentAnswer>,
}

pub async fn analyze_wellness_score(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<WellnessAnalysis>, ApiError> {
    let body: AnalyzeWellnessScoreBody = parse_body(body)?;
    ensure_user_id(body.user_id)?;

    let analysis = state
        .generation
        .analyze_wellness_scores(&body.assessment_responses)
        .await
        .map_err(|e| {
            error!("Wellness analysis failed: {e:#}");
            ApiError::Generation(e)
        })?;

    state
        .store
        .create_wellness_score(CreateWellnessScore {
            user_id: body.user_id,
            physical: analysis.physical,
            mental: analysis.mental,
            sleep: analysis.sleep,
            stress: analysis.stress,
            nutrition: analysis.nutrition,
            overall_score: analysis.overall_score,
        })
        .await?;

    Ok(Json(analysis))
}

// ── HSA optimization ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeHsaBody {
    pub user_id: i32,
    pub hsa_info: HsaSnapshot,
    pub wellness_scores: ScoreSet,
}

pub async fn optimize_hsa(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<HsaOptimization>, ApiError> {
    let body: OptimizeHsaBody = parse_body(body)?;
    ensure_user_id(body.user_id)?;

    let optimization = state
        .generation
        .optimize_hsa(&body.hsa_info, &body.wellness_scores)
        .await
        .map_err(|e| {
            error!("HSA optimization failed: {e:#}");
            ApiError::Generation(e)
        })?;

    // Only a meaningful estimate updates the stored record.
    if optimization.tax_savings > 0.0 {
        state
            .store
            .create_or_update_hsa_info(CreateHsaInfo {
                user_id: body.user_id,
                balance: body.hsa_info.balance,
                annual_limit: body.hsa_info.annual_limit,
                tax_savings: Some(optimization.tax_savings),
            })
            .await?;
    }

    Ok(Json(optimization))
}

// ── Abby ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbbyResponseBody {
    pub user_id: i32,
    pub messages: Vec<ConversationMessage>,
}

#[derive(Debug, Serialize)]
pub struct AbbyReplyResponse {
    pub content: String,
}

pub async fn abby_response(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<AbbyReplyResponse>, ApiError> {
    let body: AbbyResponseBody = parse_body(body)?;
    ensure_user_id(body.user_id)?;
    for message in &body.messages {
        validate_chat_role(&message.role).map_err(invalid)?;
    }

    let content = state
        .generation
        .abby_response(&body.messages)
        .await
        .map_err(|e| {
            error!("Assistant reply failed: {e:#}");
            ApiError::Generation(e)
        })?;

    state
        .store
        .create_chat_message(CreateChatMessage {
            user_id: body.user_id,
            role: "assistant".to_string(),
            content: content.clone(),
        })
        .await?;

    Ok(Json(AbbyReplyResponse { content }))
}
