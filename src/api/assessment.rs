use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use super::error::{invalid, parse_body, ApiError};
use super::AppState;
use crate::models::{AssessmentAnswer, AssessmentQuestion};
use crate::services::AssessmentOutcome;

/// The fixed wellness assessment, served so clients need not hardcode it.
const ASSESSMENT_QUESTIONS: &[AssessmentQuestion] = &[
    AssessmentQuestion {
        id: "eating_habits",
        text: "How would you rate your eating habits these days?",
        question_type: "likert",
        options: &["Excellent", "Very good", "Good", "Fair", "Not good at all"],
    },
    AssessmentQuestion {
        id: "weight_management",
        text: "How do you manage your weight?",
        question_type: "likert",
        options: &["Excellent", "Very good", "Good", "Fair", "Not good at all"],
    },
    AssessmentQuestion {
        id: "work_stress",
        text: "How often do you feel overwhelmed at work?",
        question_type: "likert",
        options: &["Never", "Rarely", "Sometimes", "Often", "Almost always"],
    },
    AssessmentQuestion {
        id: "screens_bedtime",
        text: "Do you use screens within an hour of bedtime?",
        question_type: "likert",
        options: &["Never", "Rarely", "Sometimes", "Often", "Almost always"],
    },
    AssessmentQuestion {
        id: "sleep_quality",
        text: "How would you rate your sleep quality?",
        question_type: "likert",
        options: &["Excellent", "Very good", "Good", "Fair", "Poor"],
    },
    AssessmentQuestion {
        id: "hsa_awareness",
        text: "Are you aware of your HSA balance and coverage?",
        question_type: "likert",
        options: &[
            "Very aware",
            "Somewhat aware",
            "Neutral",
            "Somewhat unaware",
            "Not aware at all",
        ],
    },
    AssessmentQuestion {
        id: "hsa_barriers",
        text: "What obstacles have prevented you from using your HSA fully?",
        question_type: "multiple_choice",
        options: &[
            "Lack of knowledge",
            "Complicated process",
            "Forgot about it",
            "No immediate health needs",
            "Other",
        ],
    },
    AssessmentQuestion {
        id: "chronic_conditions",
        text: "Do you have any chronic conditions (e.g., diabetes, hypertension)?",
        question_type: "boolean",
        options: &["Yes", "No"],
    },
];

pub fn assessment_routes() -> Router<AppState> {
    Router::new()
        .route("/assessment/questions", get(get_assessment_questions))
        .route("/assessment/complete", post(complete_assessment))
}

pub async fn get_assessment_questions() -> Json<&'static [AssessmentQuestion]> {
    Json(ASSESSMENT_QUESTIONS)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteAssessmentBody {
    pub user_id: i32,
    pub assessment_responses: Vec<AssessmentAnswer>,
    pub week_count: Option<i32>,
    pub idempotency_key: Option<String>,
}

/// Run the whole assessment chain server-side: persist the answers, analyze
/// scores, generate recommendations and the action plan, with explicit
/// per-step statuses and server-side fallback.
pub async fn complete_assessment(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<AssessmentOutcome>, ApiError> {
    let body: CompleteAssessmentBody = parse_body(body)?;

    state
        .store
        .get_user(body.user_id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;

    if body.assessment_responses.is_empty() {
        return Err(ApiError::InvalidRequest(
            "assessmentResponses must not be empty".to_string(),
        ));
    }
    let week_count = body.week_count.unwrap_or(4);
    crate::models::validate_week_count(week_count).map_err(invalid)?;

    let outcome = state
        .pipeline
        .complete_assessment(
            body.user_id,
            &body.assessment_responses,
            week_count,
            body.idempotency_key,
        )
        .await?;

    Ok(Json(outcome))
}
