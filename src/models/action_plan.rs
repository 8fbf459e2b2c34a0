use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single week of the multi-week action plan. Tasks are an ordered list;
/// the PATCH endpoint addresses them by position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlan {
    pub id: i32,
    pub user_id: i32,
    pub week_number: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub tasks: Vec<ActionPlanTask>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlanTask {
    pub description: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActionPlan {
    pub user_id: i32,
    pub week_number: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub tasks: Vec<ActionPlanTask>,
}
