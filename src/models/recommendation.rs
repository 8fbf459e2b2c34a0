use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: i32,
    pub user_id: i32,
    /// physical, mental, sleep, stress or nutrition
    pub category: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "isHSAEligible")]
    pub is_hsa_eligible: bool,
    /// "HSA Eligible", "Habit Building", etc.
    pub tag: Option<String>,
    /// Icon hint for the dashboard card (heart, brain, bed, running)
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecommendation {
    pub user_id: i32,
    pub category: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "isHSAEligible")]
    pub is_hsa_eligible: bool,
    pub tag: Option<String>,
    pub icon: Option<String>,
}
