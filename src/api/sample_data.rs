use axum::{extract::State, routing::post, Json, Router};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::error::{parse_body, ApiError};
use super::AppState;
use crate::models::{
    ActionPlanTask, CreateActionPlan, CreateAssessmentResponse, CreateChatMessage, CreateHsaInfo,
    CreateRecommendation, CreateWellnessScore,
};

pub fn sample_data_routes() -> Router<AppState> {
    Router::new().route("/sample-data/load", post(load_sample_data))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadSampleDataBody {
    pub user_id: i32,
}

/// Monday-Sunday bounds of the week `week_offset` weeks from now.
fn week_start_end(week_offset: i64) -> (NaiveDate, NaiveDate) {
    let day = Utc::now().date_naive() + Duration::weeks(week_offset);
    let start = day - Duration::days(day.weekday().num_days_from_monday() as i64);
    (start, start + Duration::days(6))
}

/// Populate every collection with fixed demo content. Additive on all
/// collections except HSA info, which is only created when absent.
pub async fn load_sample_data(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let body: LoadSampleDataBody = parse_body(body)?;
    let user_id = body.user_id;

    state
        .store
        .get_user(user_id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;

    if state.store.get_hsa_info(user_id).await?.is_none() {
        state
            .store
            .create_or_update_hsa_info(CreateHsaInfo {
                user_id,
                balance: 1850.0,
                annual_limit: 3850.0,
                tax_savings: Some(450.0),
            })
            .await?;
    }

    state
        .store
        .create_wellness_score(CreateWellnessScore {
            user_id,
            physical: 82,
            mental: 68,
            sleep: 60,
            stress: 65,
            nutrition: 72,
            overall_score: 70,
        })
        .await?;

    let recommendations = [
        (
            "sleep",
            "Establish a consistent sleep schedule",
            "Go to bed and wake up at the same time each day, even on weekends, to regulate your body's internal clock.",
            false,
            "bed",
            "Habit Building",
        ),
        (
            "sleep",
            "Sleep consultation",
            "Consult with a sleep specialist to address ongoing sleep issues and develop a personalized sleep improvement plan.",
            true,
            "bed",
            "HSA Eligible",
        ),
        (
            "mental",
            "Mindfulness meditation practice",
            "Set aside 10-15 minutes daily for guided meditation using apps like Headspace or Calm to reduce stress and anxiety.",
            false,
            "brain",
            "Habit Building",
        ),
        (
            "mental",
            "Therapy sessions",
            "Schedule bi-weekly therapy sessions with a licensed mental health professional to improve your emotional well-being.",
            true,
            "brain",
            "HSA Eligible",
        ),
        (
            "physical",
            "Daily 30-minute walks",
            "Incorporate a 30-minute brisk walk into your daily routine to improve cardiovascular health and mood.",
            false,
            "heart",
            "Habit Building",
        ),
        (
            "physical",
            "Ergonomic assessment",
            "Get a professional evaluation of your work setup to prevent repetitive strain injuries and improve posture.",
            true,
            "heart",
            "HSA Eligible",
        ),
        (
            "nutrition",
            "Meal planning and preparation",
            "Set aside time each weekend to plan and prepare healthy meals for the week to avoid unhealthy food choices.",
            false,
            "running",
            "Habit Building",
        ),
        (
            "nutrition",
            "Nutritionist consultation",
            "Meet with a registered dietitian to create a personalized nutrition plan based on your health goals and dietary needs.",
            true,
            "running",
            "HSA Eligible",
        ),
    ];

    for (category, title, description, is_hsa_eligible, icon, tag) in recommendations {
        state
            .store
            .create_recommendation(CreateRecommendation {
                user_id,
                category: category.to_string(),
                title: title.to_string(),
                description: description.to_string(),
                is_hsa_eligible,
                tag: Some(tag.to_string()),
                icon: Some(icon.to_string()),
            })
            .await?;
    }

    let weekly_tasks: [&[(&str, bool)]; 4] = [
        &[
            ("Go to bed at the same time for 7 days straight", true),
            ("Research sleep specialists covered by your insurance", true),
            ("Download a meditation app and try a 5-minute session", false),
            ("Take a 15-minute walk after lunch each day", false),
            ("Create a grocery list with more fruits and vegetables", true),
        ],
        &[
            ("Schedule appointment with sleep specialist", false),
            ("Increase meditation sessions to 10 minutes", false),
            ("Research local therapists covered by HSA", false),
            ("Extend daily walks to 20 minutes", false),
            ("Prepare lunches for the work week in advance", false),
        ],
        &[
            ("Attend sleep specialist appointment", false),
            ("Contact and schedule initial therapy session", false),
            ("Try a guided meditation for stress reduction", false),
            ("Schedule an ergonomic assessment of your workspace", false),
            ("Increase daily water intake to 8 glasses", false),
        ],
        &[
            ("Start implementing sleep specialist recommendations", false),
            ("Attend first therapy session", false),
            ("Increase walks to 30 minutes and add light stretching", false),
            ("Schedule nutritionist appointment", false),
            ("Make workspace changes based on ergonomic assessment", false),
        ],
    ];

    for (index, tasks) in weekly_tasks.iter().enumerate() {
        let (start_date, end_date) = week_start_end(index as i64);
        state
            .store
            .create_action_plan(CreateActionPlan {
                user_id,
                week_number: index as i32 + 1,
                start_date,
                end_date,
                tasks: tasks
                    .iter()
                    .map(|(description, completed)| ActionPlanTask {
                        description: description.to_string(),
                        completed: *completed,
                    })
                    .collect(),
            })
            .await?;
    }

    let chat_messages = [
        (
            "assistant",
            "I've analyzed your wellness assessment results. It looks like improving your sleep quality should be a priority. Would you like some specific recommendations for better sleep?",
        ),
        ("user", "Yes, what do you suggest for better sleep?"),
        (
            "assistant",
            "Based on your assessment, here are three personalized sleep recommendations: 1) Establish a consistent sleep schedule by going to bed and waking up at the same time each day, 2) Reduce screen time at least 1 hour before bed, and 3) Consider consulting with a sleep specialist, which is an HSA-eligible expense. Would you like more details on any of these?",
        ),
    ];

    for (role, content) in chat_messages {
        state
            .store
            .create_chat_message(CreateChatMessage {
                user_id,
                role: role.to_string(),
                content: content.to_string(),
            })
            .await?;
    }

    let assessment_responses = [
        ("eating_habits", "Good"),
        ("weight_management", "Good"),
        ("work_stress", "Often"),
        ("screens_bedtime", "Almost always"),
        ("sleep_quality", "Fair"),
        ("hsa_awareness", "Somewhat aware"),
        ("hsa_barriers", "Lack of knowledge"),
        ("chronic_conditions", "No"),
    ];

    for (question_id, response) in assessment_responses {
        state
            .store
            .create_assessment_response(CreateAssessmentResponse {
                user_id,
                question_id: question_id.to_string(),
                response: response.to_string(),
            })
            .await?;
    }

    info!(user_id, "Sample data loaded");
    Ok(Json(json!({ "message": "Sample data loaded successfully" })))
}
