use serde::{Deserialize, Serialize};

/// The five dimension ratings exchanged with the generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSet {
    pub physical: i32,
    pub mental: i32,
    pub sleep: i32,
    pub stress: i32,
    pub nutrition: i32,
}

/// Scored assessment analysis as replied by the model. Missing fields take
/// the documented defaults instead of failing the parse; values are clamped
/// to the 0-100 scale before use.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WellnessAnalysis {
    pub physical: i32,
    pub mental: i32,
    pub sleep: i32,
    pub stress: i32,
    pub nutrition: i32,
    pub overall_score: i32,
}

impl Default for WellnessAnalysis {
    fn default() -> Self {
        WellnessAnalysis {
            physical: 70,
            mental: 65,
            sleep: 60,
            stress: 55,
            nutrition: 65,
            overall_score: 63,
        }
    }
}

impl WellnessAnalysis {
    pub fn clamped(mut self) -> Self {
        self.physical = self.physical.clamp(0, 100);
        self.mental = self.mental.clamp(0, 100);
        self.sleep = self.sleep.clamp(0, 100);
        self.stress = self.stress.clamp(0, 100);
        self.nutrition = self.nutrition.clamp(0, 100);
        self.overall_score = self.overall_score.clamp(0, 100);
        self
    }

    pub fn scores(&self) -> ScoreSet {
        ScoreSet {
            physical: self.physical,
            mental: self.mental,
            sleep: self.sleep,
            stress: self.stress,
            nutrition: self.nutrition,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRecommendation {
    pub category: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "isHSAEligible", default)]
    pub is_hsa_eligible: bool,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
}

/// The object shape the model is asked to reply with for recommendations.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RecommendationsReply {
    #[serde(default)]
    pub recommendations: Vec<GeneratedRecommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedTask {
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// One generated plan week. Dates come back as strings and are normalized to
/// the Monday-Sunday grid by the generation service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedWeek {
    #[serde(default)]
    pub week_number: i32,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub tasks: Vec<GeneratedTask>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlanReply {
    #[serde(default)]
    pub action_plan: Vec<GeneratedWeek>,
}

/// A generated week after normalization to the Monday-Sunday grid.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanWeek {
    pub week_number: i32,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub tasks: Vec<GeneratedTask>,
}

/// Category/title/description triple the action-plan prompt is built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSummary {
    pub category: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HsaRecommendation {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HsaOptimization {
    #[serde(default)]
    pub tax_savings: f64,
    #[serde(default)]
    pub recommendations: Vec<HsaRecommendation>,
}

/// HSA balance/limit pair fed into the optimization prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HsaSnapshot {
    pub balance: f64,
    pub annual_limit: f64,
}

/// One turn of a conversation as exchanged with the chat endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: String,
    pub content: String,
}

/// A single {questionId, response} pair as fed to the score analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentAnswer {
    pub question_id: String,
    pub response: String,
}
