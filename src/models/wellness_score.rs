use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One assessment's worth of 0-100 dimension ratings. Append-only per user;
/// "latest" is the record with the maximum assessment date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellnessScore {
    pub id: i32,
    pub user_id: i32,
    pub physical: i32,
    pub mental: i32,
    pub sleep: i32,
    pub stress: i32,
    pub nutrition: i32,
    pub overall_score: i32,
    pub assessment_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWellnessScore {
    pub user_id: i32,
    pub physical: i32,
    pub mental: i32,
    pub sleep: i32,
    pub stress: i32,
    pub nutrition: i32,
    pub overall_score: i32,
}
