use std::sync::Arc;

use anyhow::Result;
use chrono::{Duration, Utc};

use crate::models::{
    ActionPlanTask, CreateActionPlan, CreateChatMessage, CreateHsaInfo, CreateRecommendation,
    CreateUser, CreateWellnessScore,
};
use crate::storage::Storage;

/// Seeds the in-memory store with the demo fixture on startup. Skipped when
/// the demo user already exists.
pub struct StoreSeeder {
    store: Arc<dyn Storage>,
}

impl StoreSeeder {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    pub async fn seed_all(&self) -> Result<()> {
        tracing::info!("Starting demo data seeding...");

        if self
            .store
            .get_user_by_username("john.smith")
            .await?
            .is_some()
        {
            tracing::info!("Demo user already present, skipping seeding");
            return Ok(());
        }

        let user = self
            .store
            .create_user(CreateUser {
                username: "john.smith".to_string(),
                password: "password123".to_string(),
                first_name: Some("John".to_string()),
                last_name: Some("Smith".to_string()),
                email: Some("john.smith@example.com".to_string()),
            })
            .await?;

        self.seed_wellness_score(user.id).await?;
        self.seed_hsa_info(user.id).await?;
        self.seed_recommendations(user.id).await?;
        self.seed_action_plans(user.id).await?;
        self.seed_chat_messages(user.id).await?;

        tracing::info!("Demo data seeding completed!");
        Ok(())
    }

    async fn seed_wellness_score(&self, user_id: i32) -> Result<()> {
        self.store
            .create_wellness_score(CreateWellnessScore {
                user_id,
                physical: 78,
                mental: 65,
                sleep: 72,
                stress: 59,
                nutrition: 70,
                overall_score: 72,
            })
            .await?;
        Ok(())
    }

    async fn seed_hsa_info(&self, user_id: i32) -> Result<()> {
        self.store
            .create_or_update_hsa_info(CreateHsaInfo {
                user_id,
                balance: 2450.0,
                annual_limit: 3850.0,
                tax_savings: Some(625.0),
            })
            .await?;
        Ok(())
    }

    async fn seed_recommendations(&self, user_id: i32) -> Result<()> {
        let demo_recommendations = [
            (
                "mental",
                "Improve Mental Wellness",
                "Try mindfulness meditation for 10 minutes daily.",
                true,
                "HSA Eligible",
                "brain",
            ),
            (
                "sleep",
                "Sleep Better",
                "Reduce screen time 1 hour before bed.",
                false,
                "Habit Building",
                "bed",
            ),
            (
                "stress",
                "Stress Management",
                "Consider therapy sessions to manage work stress.",
                true,
                "HSA Eligible",
                "heart",
            ),
            (
                "physical",
                "Physical Activity",
                "Join a fitness program or personal training.",
                true,
                "HSA Eligible",
                "running",
            ),
        ];

        for (category, title, description, is_hsa_eligible, tag, icon) in demo_recommendations {
            self.store
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
        Ok(())
    }

    async fn seed_action_plans(&self, user_id: i32) -> Result<()> {
        let weekly_tasks: [&[(&str, bool)]; 4] = [
            &[
                ("10 min meditation daily", true),
                ("Schedule sleep consultation", true),
                ("Review HSA-eligible services", false),
            ],
            &[
                ("Begin stress management program", false),
                ("Try new sleep routine for 7 days", false),
                ("Book first fitness session", false),
            ],
            &[
                ("Evaluate sleep progress", false),
                ("Continue meditation practice", false),
                ("Implement nutritionist recommendations", false),
            ],
            &[
                ("Schedule follow-up wellness check", false),
                ("Review overall progress", false),
                ("Plan next month's HSA spending", false),
            ],
        ];

        let today = Utc::now().date_naive();
        for (index, tasks) in weekly_tasks.iter().enumerate() {
            let start_date = today + Duration::weeks(index as i64);
            self.store
                .create_action_plan(CreateActionPlan {
                    user_id,
                    week_number: index as i32 + 1,
                    start_date,
                    end_date: start_date + Duration::weeks(1),
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
        Ok(())
    }

    async fn seed_chat_messages(&self, user_id: i32) -> Result<()> {
        let demo_chat_messages = [
            (
                "assistant",
                "Hi John! I noticed you've been making progress on your sleep goals. How has reducing screen time before bed been working for you?",
            ),
            (
                "user",
                "It's been helping! I'm falling asleep faster but still wake up during the night.",
            ),
            (
                "assistant",
                "That's great progress! For the night waking, have you considered using your HSA funds for a sleep consultation? Many sleep therapists are HSA-eligible.",
            ),
            (
                "user",
                "I didn't know that was covered. How much would it cost?",
            ),
            (
                "assistant",
                "Typically, a sleep consultation ranges from $150-300, fully covered by your HSA. I can help you find providers in your network if you'd like!",
            ),
        ];

        for (role, content) in demo_chat_messages {
            self.store
                .create_chat_message(CreateChatMessage {
                    user_id,
                    role: role.to_string(),
                    content: content.to_string(),
                })
                .await?;
        }
        Ok(())
    }
}
