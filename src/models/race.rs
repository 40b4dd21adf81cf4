use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Race {
    pub id: i64,
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub distance_km: Option<f64>,
}
