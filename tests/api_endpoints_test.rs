use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use my_well_self::api::routes::create_routes;
use my_well_self::api::AppState;
use my_well_self::config::StoreSeeder;
use my_well_self::services::{AssessmentPipelineService, GenerationService, OpenAiClient};
use my_well_self::storage::{MemStorage, Storage};

/// App wired against a closed port; these tests never reach the generation
/// service.
async fn create_test_app() -> Router {
    let store: Arc<dyn Storage> = Arc::new(MemStorage::new());
    StoreSeeder::new(store.clone()).seed_all().await.unwrap();

    let client =
        OpenAiClient::with_base_url(String::new(), "http://127.0.0.1:9".to_string()).unwrap();
    let generation = Arc::new(GenerationService::new(client));
    let pipeline = Arc::new(AssessmentPipelineService::new(
        store.clone(),
        generation.clone(),
    ));

    create_routes(AppState {
        store,
        generation,
        pipeline,
    })
}

async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = create_test_app().await;
    let (status, body) = send_json(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_get_user_strips_password() {
    let app = create_test_app().await;
    let (status, body) = send_json(&app, Method::GET, "/api/users/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "john.smith");
    assert_eq!(body["firstName"], "John");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_get_user_error_statuses() {
    let app = create_test_app().await;

    let (status, _) = send_json(&app, Method::GET, "/api/users/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json(&app, Method::GET, "/api/users/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_wellness_score_create_and_latest() {
    let app = create_test_app().await;

    let (status, created) = send_json(
        &app,
        Method::POST,
        "/api/users/1/wellness-scores",
        Some(json!({
            "physical": 80, "mental": 70, "sleep": 65,
            "stress": 60, "nutrition": 75, "overallScore": 71
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    // The seeder already created score id 1 for the demo user.
    assert_eq!(created["id"], 2);

    let (status, latest) =
        send_json(&app, Method::GET, "/api/users/1/wellness-scores/latest", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(latest["overallScore"], 71);

    let (status, scores) = send_json(&app, Method::GET, "/api/users/1/wellness-scores", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(scores.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_wellness_score_validation_failures() {
    let app = create_test_app().await;

    // Out-of-range rating
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/users/1/wellness-scores",
        Some(json!({
            "physical": 150, "mental": 70, "sleep": 65,
            "stress": 60, "nutrition": 75, "overallScore": 71
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("physical"));

    // Missing field
    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/users/1/wellness-scores",
        Some(json!({ "physical": 80 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Body userId disagreeing with the path
    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/users/1/wellness-scores",
        Some(json!({
            "userId": 2, "physical": 80, "mental": 70, "sleep": 65,
            "stress": 60, "nutrition": 75, "overallScore": 71
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown user
    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/users/99/wellness-scores",
        Some(json!({
            "physical": 80, "mental": 70, "sleep": 65,
            "stress": 60, "nutrition": 75, "overallScore": 71
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_hsa_info_upsert_keeps_single_record() {
    let app = create_test_app().await;

    let (status, first) = send_json(
        &app,
        Method::POST,
        "/api/users/1/hsa-info",
        Some(json!({ "balance": 2000.0, "annualLimit": 3850.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    // Seeded record is merged onto, not duplicated.
    assert_eq!(first["id"], 1);
    assert_eq!(first["balance"], 2000.0);
    assert_eq!(first["taxSavings"], 625.0);

    let (status, second) = send_json(
        &app,
        Method::POST,
        "/api/users/1/hsa-info",
        Some(json!({ "balance": 2100.0, "annualLimit": 4000.0, "taxSavings": 700.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["id"], 1);

    let (status, stored) = send_json(&app, Method::GET, "/api/users/1/hsa-info", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["balance"], 2100.0);
    assert_eq!(stored["annualLimit"], 4000.0);
    assert_eq!(stored["taxSavings"], 700.0);
}

#[tokio::test]
async fn test_action_plan_task_patch() {
    let app = create_test_app().await;

    // Seeded plan 1, task 2 starts incomplete.
    let (status, updated) = send_json(
        &app,
        Method::PATCH,
        "/api/action-plans/1/tasks/2",
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["tasks"][2]["completed"], true);
    assert_eq!(updated["tasks"][0]["completed"], true);

    let (status, reverted) = send_json(
        &app,
        Method::PATCH,
        "/api/action-plans/1/tasks/2",
        Some(json!({ "completed": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reverted["tasks"][2]["completed"], false);

    // Out-of-range index still returns the plan.
    let (status, unchanged) = send_json(
        &app,
        Method::PATCH,
        "/api/action-plans/1/tasks/99",
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unchanged["id"], 1);

    let (status, _) = send_json(
        &app,
        Method::PATCH,
        "/api/action-plans/999/tasks/0",
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Non-boolean completed flag
    let (status, _) = send_json(
        &app,
        Method::PATCH,
        "/api/action-plans/1/tasks/0",
        Some(json!({ "completed": "yes" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chat_messages_limit_and_role_validation() {
    let app = create_test_app().await;

    // The seeder leaves five messages; the two most recent come back in
    // chronological order.
    let (status, limited) = send_json(
        &app,
        Method::GET,
        "/api/users/1/chat-messages?limit=2",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let limited = limited.as_array().unwrap().clone();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0]["content"], "I didn't know that was covered. How much would it cost?");
    assert_eq!(limited[1]["role"], "assistant");

    let (status, created) = send_json(
        &app,
        Method::POST,
        "/api/users/1/chat-messages",
        Some(json!({ "role": "user", "content": "Hello Abby" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["content"], "Hello Abby");

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/users/1/chat-messages",
        Some(json!({ "role": "moderator", "content": "hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_assessment_responses_crud() {
    let app = create_test_app().await;

    let (status, created) = send_json(
        &app,
        Method::POST,
        "/api/users/1/assessment-responses",
        Some(json!({ "questionId": "sleep_quality", "response": "Fair" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["questionId"], "sleep_quality");

    let (status, listed) = send_json(
        &app,
        Method::GET,
        "/api/users/1/assessment-responses",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_assessment_questions_served() {
    let app = create_test_app().await;

    let (status, questions) = send_json(&app, Method::GET, "/api/assessment/questions", None).await;
    assert_eq!(status, StatusCode::OK);
    let questions = questions.as_array().unwrap().clone();
    assert_eq!(questions.len(), 8);
    assert_eq!(questions[0]["id"], "eating_habits");
    assert_eq!(questions[7]["type"], "boolean");
}

#[tokio::test]
async fn test_sample_data_load_hsa_idempotent_collections_additive() {
    let app = create_test_app().await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/sample-data/load",
        Some(json!({ "userId": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Sample data loaded successfully");

    let (_, scores_after_first) =
        send_json(&app, Method::GET, "/api/users/1/wellness-scores", None).await;
    let first_count = scores_after_first.as_array().unwrap().len();

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/sample-data/load",
        Some(json!({ "userId": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Additive on scores, recommendations, plans, messages, responses.
    let (_, scores_after_second) =
        send_json(&app, Method::GET, "/api/users/1/wellness-scores", None).await;
    assert_eq!(
        scores_after_second.as_array().unwrap().len(),
        first_count + 1
    );

    // HSA info stays a single record with the seeded values.
    let (status, hsa) = send_json(&app, Method::GET, "/api/users/1/hsa-info", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hsa["id"], 1);
    assert_eq!(hsa["balance"], 2450.0);
}

#[tokio::test]
async fn test_generation_endpoint_shape_validation() {
    let app = create_test_app().await;

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/generate/recommendations",
        Some(json!({ "userId": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/chat/completions",
        Some(json!({ "userId": 0, "messages": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/abby/response",
        Some(json!({ "userId": 1, "messages": [{ "role": "system", "content": "hi" }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generation_failure_maps_to_500() {
    // The test app points at a closed port, so the upstream call errors.
    let app = create_test_app().await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/chat/completions",
        Some(json!({ "userId": 1, "messages": [{ "role": "user", "content": "hi" }] })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal server error");
    assert!(body["error"].as_str().is_some());
}
