use serde::{Deserialize, Serialize};

/// HSA account snapshot. One record per user, upserted in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HsaInfo {
    pub id: i32,
    pub user_id: i32,
    pub balance: f64,
    pub annual_limit: f64,
    pub tax_savings: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHsaInfo {
    pub user_id: i32,
    pub balance: f64,
    pub annual_limit: f64,
    pub tax_savings: Option<f64>,
}
