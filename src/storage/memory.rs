use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::Storage;
use crate::models::{
    ActionPlan, AssessmentResponse, ChatMessage, CreateActionPlan, CreateAssessmentResponse,
    CreateChatMessage, CreateHsaInfo, CreateRecommendation, CreateUser, CreateWellnessScore,
    HsaInfo, Recommendation, User, WellnessScore,
};

/// Per-entity tables. Collections other than users are keyed by user id and
/// hold append-only vecs; HSA info is one record per user.
#[derive(Default)]
struct Tables {
    users: HashMap<i32, User>,
    wellness_scores: HashMap<i32, Vec<WellnessScore>>,
    hsa_infos: HashMap<i32, HsaInfo>,
    recommendations: HashMap<i32, Vec<Recommendation>>,
    action_plans: HashMap<i32, Vec<ActionPlan>>,
    chat_messages: HashMap<i32, Vec<ChatMessage>>,
    assessment_responses: HashMap<i32, Vec<AssessmentResponse>>,

    user_id: i32,
    wellness_score_id: i32,
    hsa_info_id: i32,
    recommendation_id: i32,
    action_plan_id: i32,
    chat_message_id: i32,
    assessment_response_id: i32,
}

impl Tables {
    fn new() -> Self {
        Tables {
            user_id: 1,
            wellness_score_id: 1,
            hsa_info_id: 1,
            recommendation_id: 1,
            action_plan_id: 1,
            chat_message_id: 1,
            assessment_response_id: 1,
            ..Tables::default()
        }
    }
}

/// In-process store. The lock satisfies the aliasing rules; there is no
/// cross-operation isolation (single-user demo scope).
pub struct MemStorage {
    tables: RwLock<Tables>,
}

impl MemStorage {
    pub fn new() -> Self {
        MemStorage {
            tables: RwLock::new(Tables::new()),
        }
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn get_user(&self, id: i32) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create_user(&self, user: CreateUser) -> Result<User> {
        let mut tables = self.tables.write().await;
        let id = tables.user_id;
        tables.user_id += 1;

        let user = User {
            id,
            username: user.username,
            password: user.password,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            created_at: Utc::now(),
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn get_wellness_scores(&self, user_id: i32) -> Result<Vec<WellnessScore>> {
        let tables = self.tables.read().await;
        Ok(tables
            .wellness_scores
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_latest_wellness_score(&self, user_id: i32) -> Result<Option<WellnessScore>> {
        let tables = self.tables.read().await;
        Ok(tables
            .wellness_scores
            .get(&user_id)
            .and_then(|scores| scores.iter().max_by_key(|s| s.assessment_date))
            .cloned())
    }

    async fn create_wellness_score(&self, score: CreateWellnessScore) -> Result<WellnessScore> {
        let mut tables = self.tables.write().await;
        let id = tables.wellness_score_id;
        tables.wellness_score_id += 1;

        let record = WellnessScore {
            id,
            user_id: score.user_id,
            physical: score.physical,
            mental: score.mental,
            sleep: score.sleep,
            stress: score.stress,
            nutrition: score.nutrition,
            overall_score: score.overall_score,
            assessment_date: Utc::now(),
        };
        tables
            .wellness_scores
            .entry(score.user_id)
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn get_hsa_info(&self, user_id: i32) -> Result<Option<HsaInfo>> {
        let tables = self.tables.read().await;
        Ok(tables.hsa_infos.get(&user_id).cloned())
    }

    async fn create_or_update_hsa_info(&self, info: CreateHsaInfo) -> Result<HsaInfo> {
        let mut tables = self.tables.write().await;

        if let Some(existing) = tables.hsa_infos.get_mut(&info.user_id) {
            existing.balance = info.balance;
            existing.annual_limit = info.annual_limit;
            if info.tax_savings.is_some() {
                existing.tax_savings = info.tax_savings;
            }
            return Ok(existing.clone());
        }

        let id = tables.hsa_info_id;
        tables.hsa_info_id += 1;

        let record = HsaInfo {
            id,
            user_id: info.user_id,
            balance: info.balance,
            annual_limit: info.annual_limit,
            tax_savings: info.tax_savings,
        };
        tables.hsa_infos.insert(info.user_id, record.clone());
        Ok(record)
    }

    async fn get_recommendations(&self, user_id: i32) -> Result<Vec<Recommendation>> {
        let tables = self.tables.read().await;
        Ok(tables
            .recommendations
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_recommendation(
        &self,
        recommendation: CreateRecommendation,
    ) -> Result<Recommendation> {
        let mut tables = self.tables.write().await;
        let id = tables.recommendation_id;
        tables.recommendation_id += 1;

        let record = Recommendation {
            id,
            user_id: recommendation.user_id,
            category: recommendation.category,
            title: recommendation.title,
            description: recommendation.description,
            is_hsa_eligible: recommendation.is_hsa_eligible,
            tag: recommendation.tag,
            icon: recommendation.icon,
        };
        tables
            .recommendations
            .entry(record.user_id)
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn get_action_plans(&self, user_id: i32) -> Result<Vec<ActionPlan>> {
        let tables = self.tables.read().await;
        Ok(tables
            .action_plans
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_action_plan(&self, plan: CreateActionPlan) -> Result<ActionPlan> {
        let mut tables = self.tables.write().await;
        let id = tables.action_plan_id;
        tables.action_plan_id += 1;

        let record = ActionPlan {
            id,
            user_id: plan.user_id,
            week_number: plan.week_number,
            start_date: plan.start_date,
            end_date: plan.end_date,
            tasks: plan.tasks,
        };
        tables
            .action_plans
            .entry(record.user_id)
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn update_action_plan_task(
        &self,
        plan_id: i32,
        task_index: usize,
        completed: bool,
    ) -> Result<Option<ActionPlan>> {
        let mut tables = self.tables.write().await;

        // The PATCH route addresses plans by id alone, so scan every user.
        for plans in tables.action_plans.values_mut() {
            if let Some(plan) = plans.iter_mut().find(|p| p.id == plan_id) {
                if let Some(task) = plan.tasks.get_mut(task_index) {
                    task.completed = completed;
                }
                return Ok(Some(plan.clone()));
            }
        }

        Ok(None)
    }

    async fn get_chat_messages(
        &self,
        user_id: i32,
        limit: Option<usize>,
    ) -> Result<Vec<ChatMessage>> {
        let tables = self.tables.read().await;
        let mut messages = tables
            .chat_messages
            .get(&user_id)
            .cloned()
            .unwrap_or_default();
        messages.sort_by_key(|m| m.timestamp);

        if let Some(limit) = limit {
            let skip = messages.len().saturating_sub(limit);
            messages.drain(..skip);
        }
        Ok(messages)
    }

    async fn create_chat_message(&self, message: CreateChatMessage) -> Result<ChatMessage> {
        let mut tables = self.tables.write().await;
        let id = tables.chat_message_id;
        tables.chat_message_id += 1;

        let record = ChatMessage {
            id,
            user_id: message.user_id,
            role: message.role,
            content: message.content,
            timestamp: Utc::now(),
        };
        tables
            .chat_messages
            .entry(record.user_id)
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn get_assessment_responses(&self, user_id: i32) -> Result<Vec<AssessmentResponse>> {
        let tables = self.tables.read().await;
        Ok(tables
            .assessment_responses
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_assessment_response(
        &self,
        response: CreateAssessmentResponse,
    ) -> Result<AssessmentResponse> {
        let mut tables = self.tables.write().await;
        let id = tables.assessment_response_id;
        tables.assessment_response_id += 1;

        let record = AssessmentResponse {
            id,
            user_id: response.user_id,
            question_id: response.question_id,
            response: response.response,
            timestamp: Utc::now(),
        };
        tables
            .assessment_responses
            .entry(record.user_id)
            .or_default()
            .push(record.clone());
        Ok(record)
    }
}
