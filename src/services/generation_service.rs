use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use regex::Regex;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::openai_client::{ChatCompletionMessage, OpenAiClient};
use crate::models::{
    ActionPlanReply, AssessmentAnswer, ConversationMessage, GeneratedRecommendation, GeneratedWeek,
    HsaOptimization, HsaSnapshot, PlanWeek, RecommendationSummary, RecommendationsReply, ScoreSet,
    WellnessAnalysis,
};

/// Abby's persona instruction, shared by the assistant endpoints.
const ABBY_SYSTEM_PROMPT: &str = "You are Abby, an AI wellness assistant in the My Well Self application. \
    You help users with their wellness journey, answering questions about health, wellness, stress management, \
    sleep hygiene, and HSA information. Keep your responses concise, conversational, and supportive. \
    If asked about medical specifics, always suggest consulting a healthcare professional.";

const ABBY_EMPTY_REPLY: &str =
    "I'm sorry, I couldn't process that response. How else can I help you with your wellness journey?";

const ABBY_MAX_TOKENS: u32 = 300;

/// Prompt templates and typed reply parsing for the generation use cases.
///
/// Replies are schema-validated with per-field defaults (missing fields are
/// defaulted, scores clamped, markdown fences stripped); a reply that is not
/// JSON at all is still an error.
pub struct GenerationService {
    client: OpenAiClient,
    json_fence: Regex,
}

impl GenerationService {
    pub fn new(client: OpenAiClient) -> Self {
        GenerationService {
            client,
            json_fence: Regex::new(r"(?s)^\s*```(?:json)?\s*(.*?)\s*```\s*$").unwrap(),
        }
    }

    /// Free-form completion over a caller-supplied conversation.
    pub async fn chat_completion(
        &self,
        messages: &[ConversationMessage],
    ) -> Result<Option<String>> {
        let formatted: Vec<ChatCompletionMessage> = messages
            .iter()
            .map(|m| ChatCompletionMessage::new(&m.role, m.content.clone()))
            .collect();

        self.client.chat_completion(&formatted, false, None).await
    }

    /// Score the user's assessment answers across the five dimensions.
    pub async fn analyze_wellness_scores(
        &self,
        answers: &[AssessmentAnswer],
    ) -> Result<WellnessAnalysis> {
        let prompt = format!(
            "Based on the following assessment responses, analyze the user's wellness and provide scores (0-100) for each category:\n{}\n\n\
             Please evaluate and score the following areas:\n\
             1. Physical health\n\
             2. Mental wellbeing\n\
             3. Sleep quality\n\
             4. Stress management\n\
             5. Nutrition\n\
             6. Overall wellness score (average of all categories)\n\n\
             Format your response as a JSON object with these fields: physical, mental, sleep, stress, nutrition, overallScore.",
            serde_json::to_string_pretty(answers)?
        );

        let messages = [
            ChatCompletionMessage::new("system", "You are a wellness assessment specialist."),
            ChatCompletionMessage::new("user", prompt),
        ];

        let content = self.client.chat_completion(&messages, true, None).await?;
        let analysis = match content {
            Some(content) => self.parse_reply::<WellnessAnalysis>(&content)?,
            None => WellnessAnalysis::default(),
        };
        Ok(analysis.clamped())
    }

    /// Personalized recommendations for the given wellness scores.
    pub async fn generate_recommendations(
        &self,
        scores: &ScoreSet,
    ) -> Result<Vec<GeneratedRecommendation>> {
        let prompt = format!(
            "Based on the following wellness scores (0-100 scale), provide 5 personalized recommendations to improve the user's wellness:\n\
             - Physical health: {}\n\
             - Mental wellbeing: {}\n\
             - Sleep quality: {}\n\
             - Stress management: {}\n\
             - Nutrition: {}\n\n\
             For each recommendation, include:\n\
             1. Category (one of: physical, mental, sleep, stress, nutrition)\n\
             2. Title (short, actionable)\n\
             3. Description (1-2 sentences, specific advice)\n\
             4. Whether it is HSA eligible (true/false)\n\
             5. Icon suggestion (one of: heart, brain, bed, running)\n\
             6. Optional tag\n\n\
             Format your response as a JSON object with a \"recommendations\" array where each object has: \
             category, title, description, isHSAEligible, icon, tag fields.",
            scores.physical, scores.mental, scores.sleep, scores.stress, scores.nutrition
        );

        let messages = [
            ChatCompletionMessage::new("system", "You are a wellness expert and health coach."),
            ChatCompletionMessage::new("user", prompt),
        ];

        let content = self.client.chat_completion(&messages, true, None).await?;
        let Some(content) = content else {
            return Ok(Vec::new());
        };

        // Some replies come back as a bare array instead of the requested
        // object wrapper; accept both.
        let value: serde_json::Value = serde_json::from_str(self.extract_json(&content))
            .context("Failed to parse recommendations reply")?;
        if value.is_array() {
            return serde_json::from_value(value).context("Failed to parse recommendations reply");
        }
        let reply: RecommendationsReply =
            serde_json::from_value(value).context("Failed to parse recommendations reply")?;
        Ok(reply.recommendations)
    }

    /// A week-by-week action plan implementing the given recommendations.
    ///
    /// Weeks are renumbered 1..N and realigned to Monday-Sunday boundaries
    /// starting the next Monday whenever the reply's numbering or dates are
    /// missing or malformed.
    pub async fn generate_action_plan(
        &self,
        recommendations: &[RecommendationSummary],
        week_count: i32,
    ) -> Result<Vec<PlanWeek>> {
        let prompt = format!(
            "Based on the following wellness recommendations, create a {week_count}-week action plan:\n{}\n\n\
             For each week, create 4-5 concrete, actionable tasks that will help the user implement these recommendations.\n\
             The plan should gradually build in complexity and commitment.\n\n\
             Format your response as a JSON object with an \"actionPlan\" array where each object has:\n\
             1. weekNumber (1 to {week_count})\n\
             2. startDate (use YYYY-MM-DD, starting from next Monday)\n\
             3. endDate (use YYYY-MM-DD, each week ends on Sunday)\n\
             4. tasks (an array of objects with \"description\" and \"completed\" fields, where completed is false)",
            serde_json::to_string_pretty(recommendations)?
        );

        let messages = [
            ChatCompletionMessage::new(
                "system",
                "You are a wellness coach who creates effective action plans.",
            ),
            ChatCompletionMessage::new("user", prompt),
        ];

        let content = self.client.chat_completion(&messages, true, None).await?;
        let weeks = match content {
            Some(content) => {
                self.parse_reply::<ActionPlanReply>(&content)?
                    .action_plan
            }
            None => Vec::new(),
        };

        let anchor = next_monday(Utc::now().date_naive());
        Ok(weeks
            .into_iter()
            .enumerate()
            .map(|(index, week)| normalize_week(week, index, week_count, anchor))
            .collect())
    }

    /// HSA spending advice derived from the balance/limit pair and scores.
    pub async fn optimize_hsa(
        &self,
        hsa: &HsaSnapshot,
        scores: &ScoreSet,
    ) -> Result<HsaOptimization> {
        let prompt = format!(
            "Based on the user's HSA information and wellness scores, provide personalized HSA optimization advice:\n\n\
             HSA Information:\n\
             - Current balance: ${}\n\
             - Annual contribution limit: ${}\n\n\
             Wellness Scores (0-100 scale):\n\
             - Physical health: {}\n\
             - Mental wellbeing: {}\n\
             - Sleep quality: {}\n\
             - Stress management: {}\n\
             - Nutrition: {}\n\n\
             Provide:\n\
             1. A calculated tax savings estimate based on a 25% tax rate\n\
             2. 3-5 specific, HSA-eligible products or services that address their lowest wellness scores\n\
             3. Projected costs for each recommendation\n\
             4. Priority level for each recommendation\n\n\
             Format your response as a JSON object with these fields: taxSavings, recommendations \
             (array of objects with title, description, cost, priority, and category fields).",
            hsa.balance,
            hsa.annual_limit,
            scores.physical,
            scores.mental,
            scores.sleep,
            scores.stress,
            scores.nutrition
        );

        let messages = [
            ChatCompletionMessage::new(
                "system",
                "You are a financial wellness advisor specializing in HSA optimization.",
            ),
            ChatCompletionMessage::new("user", prompt),
        ];

        let content = self.client.chat_completion(&messages, true, None).await?;
        match content {
            Some(content) => self.parse_reply(&content),
            None => Ok(HsaOptimization::default()),
        }
    }

    /// Abby's reply to the recent conversation turns.
    pub async fn abby_response(&self, conversation: &[ConversationMessage]) -> Result<String> {
        let mut messages = vec![ChatCompletionMessage::new("system", ABBY_SYSTEM_PROMPT)];
        messages.extend(
            conversation
                .iter()
                .map(|m| ChatCompletionMessage::new(&m.role, m.content.clone())),
        );

        let content = self
            .client
            .chat_completion(&messages, false, Some(ABBY_MAX_TOKENS))
            .await?;

        Ok(content.unwrap_or_else(|| {
            warn!("Assistant reply came back empty, substituting the stock apology");
            ABBY_EMPTY_REPLY.to_string()
        }))
    }

    /// Strip a surrounding markdown code fence, if any.
    fn extract_json<'a>(&self, content: &'a str) -> &'a str {
        match self.json_fence.captures(content) {
            Some(captures) => captures.get(1).map_or(content, |m| m.as_str()),
            None => content.trim(),
        }
    }

    fn parse_reply<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        serde_json::from_str(self.extract_json(content)).context("Failed to parse generation reply")
    }
}

/// The Monday strictly after `today`.
fn next_monday(today: NaiveDate) -> NaiveDate {
    let days_ahead = 7 - today.weekday().num_days_from_monday() as i64;
    today + Duration::days(days_ahead)
}

fn normalize_week(week: GeneratedWeek, index: usize, week_count: i32, anchor: NaiveDate) -> PlanWeek {
    let week_number = if (1..=week_count).contains(&week.week_number) {
        week.week_number
    } else {
        index as i32 + 1
    };

    let grid_start = anchor + Duration::weeks(week_number as i64 - 1);
    let start_date = NaiveDate::parse_from_str(&week.start_date, "%Y-%m-%d").unwrap_or(grid_start);
    let end_date = NaiveDate::parse_from_str(&week.end_date, "%Y-%m-%d")
        .unwrap_or_else(|_| start_date + Duration::days(6));

    PlanWeek {
        week_number,
        start_date,
        end_date,
        tasks: week.tasks,
    }
}
