use my_well_self::models::{
    ActionPlanTask, CreateActionPlan, CreateChatMessage, CreateHsaInfo, CreateRecommendation,
    CreateUser, CreateWellnessScore,
};
use my_well_self::storage::{MemStorage, Storage};

use chrono::NaiveDate;
use pretty_assertions::assert_eq;

fn demo_user() -> CreateUser {
    CreateUser {
        username: "test.user".to_string(),
        password: "password123".to_string(),
        first_name: Some("Test".to_string()),
        last_name: Some("User".to_string()),
        email: Some("test.user@example.com".to_string()),
    }
}

fn score(user_id: i32, overall: i32) -> CreateWellnessScore {
    CreateWellnessScore {
        user_id,
        physical: 70,
        mental: 65,
        sleep: 60,
        stress: 55,
        nutrition: 68,
        overall_score: overall,
    }
}

fn plan(user_id: i32, week_number: i32) -> CreateActionPlan {
    CreateActionPlan {
        user_id,
        week_number,
        start_date: NaiveDate::from_ymd_opt(2024, 7, 8).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 7, 14).unwrap(),
        tasks: vec![
            ActionPlanTask {
                description: "10 min meditation daily".to_string(),
                completed: false,
            },
            ActionPlanTask {
                description: "Take a walk after lunch".to_string(),
                completed: false,
            },
        ],
    }
}

#[tokio::test]
async fn test_created_ids_are_unique_and_increasing() {
    let store = MemStorage::new();
    let user = store.create_user(demo_user()).await.unwrap();

    let first = store.create_wellness_score(score(user.id, 70)).await.unwrap();
    let second = store.create_wellness_score(score(user.id, 71)).await.unwrap();
    let third = store.create_wellness_score(score(user.id, 72)).await.unwrap();

    assert!(first.id < second.id && second.id < third.id);

    // Counters are scoped per entity type.
    let rec = store
        .create_recommendation(CreateRecommendation {
            user_id: user.id,
            category: "sleep".to_string(),
            title: "Sleep Better".to_string(),
            description: "Reduce screen time 1 hour before bed.".to_string(),
            is_hsa_eligible: false,
            tag: None,
            icon: None,
        })
        .await
        .unwrap();
    assert_eq!(rec.id, 1);
}

#[tokio::test]
async fn test_get_user_strips_nothing_and_missing_is_none() {
    let store = MemStorage::new();
    assert!(store.get_user(42).await.unwrap().is_none());

    let user = store.create_user(demo_user()).await.unwrap();
    let fetched = store.get_user(user.id).await.unwrap().unwrap();
    assert_eq!(fetched.username, "test.user");

    let by_name = store.get_user_by_username("test.user").await.unwrap();
    assert_eq!(by_name.map(|u| u.id), Some(user.id));
    assert!(store.get_user_by_username("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_latest_wellness_score_is_max_assessment_date() {
    let store = MemStorage::new();
    let user = store.create_user(demo_user()).await.unwrap();

    assert!(store
        .get_latest_wellness_score(user.id)
        .await
        .unwrap()
        .is_none());

    store.create_wellness_score(score(user.id, 60)).await.unwrap();
    store.create_wellness_score(score(user.id, 65)).await.unwrap();
    let newest = store.create_wellness_score(score(user.id, 72)).await.unwrap();

    let latest = store
        .get_latest_wellness_score(user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.id, newest.id);
    assert_eq!(latest.overall_score, 72);
}

#[tokio::test]
async fn test_hsa_upsert_merges_onto_one_record() {
    let store = MemStorage::new();
    let user = store.create_user(demo_user()).await.unwrap();

    let first = store
        .create_or_update_hsa_info(CreateHsaInfo {
            user_id: user.id,
            balance: 2450.0,
            annual_limit: 3850.0,
            tax_savings: Some(625.0),
        })
        .await
        .unwrap();

    let second = store
        .create_or_update_hsa_info(CreateHsaInfo {
            user_id: user.id,
            balance: 2000.0,
            annual_limit: 3850.0,
            tax_savings: None,
        })
        .await
        .unwrap();

    // Same record, second call's values merged onto the first.
    assert_eq!(second.id, first.id);
    assert_eq!(second.balance, 2000.0);
    assert_eq!(second.tax_savings, Some(625.0));

    let stored = store.get_hsa_info(user.id).await.unwrap().unwrap();
    assert_eq!(stored.id, first.id);
    assert_eq!(stored.balance, 2000.0);
}

#[tokio::test]
async fn test_action_plan_task_toggle_round_trip() {
    let store = MemStorage::new();
    let user = store.create_user(demo_user()).await.unwrap();
    let created = store.create_action_plan(plan(user.id, 1)).await.unwrap();

    let updated = store
        .update_action_plan_task(created.id, 0, true)
        .await
        .unwrap()
        .unwrap();
    assert!(updated.tasks[0].completed);
    assert!(!updated.tasks[1].completed);

    let reverted = store
        .update_action_plan_task(created.id, 0, false)
        .await
        .unwrap()
        .unwrap();
    assert!(!reverted.tasks[0].completed);
    assert!(!reverted.tasks[1].completed);
}

#[tokio::test]
async fn test_action_plan_task_out_of_range_leaves_tasks_unchanged() {
    let store = MemStorage::new();
    let user = store.create_user(demo_user()).await.unwrap();
    let created = store.create_action_plan(plan(user.id, 1)).await.unwrap();

    let updated = store
        .update_action_plan_task(created.id, 99, true)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert!(updated.tasks.iter().all(|task| !task.completed));

    // Unknown plan id is a miss, not an error.
    assert!(store
        .update_action_plan_task(999, 0, true)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_chat_messages_limit_returns_recent_in_ascending_order() {
    let store = MemStorage::new();
    let user = store.create_user(demo_user()).await.unwrap();

    for content in ["first", "second", "third", "fourth"] {
        store
            .create_chat_message(CreateChatMessage {
                user_id: user.id,
                role: "user".to_string(),
                content: content.to_string(),
            })
            .await
            .unwrap();
    }

    let limited = store.get_chat_messages(user.id, Some(2)).await.unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].content, "third");
    assert_eq!(limited[1].content, "fourth");
    assert!(limited[0].timestamp <= limited[1].timestamp);

    let all = store.get_chat_messages(user.id, None).await.unwrap();
    assert_eq!(all.len(), 4);
}
