use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResponse {
    pub id: i32,
    pub user_id: i32,
    pub question_id: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssessmentResponse {
    pub user_id: i32,
    pub question_id: String,
    pub response: String,
}

/// One question of the fixed wellness assessment served to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentQuestion {
    pub id: &'static str,
    pub text: &'static str,
    #[serde(rename = "type")]
    pub question_type: &'static str,
    pub options: &'static [&'static str],
}
