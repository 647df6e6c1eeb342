use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub provider_id: i64,
    pub service_name: String,
    pub description: Option<String>,
    pub min_price: f64,
    pub category: String,
    pub image_url: Option<String>,
    #[serde(with = "super::timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub provider: Option<User>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceCreate {
    pub service_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub min_price: f64,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ServiceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ServiceFilter {
    pub category: Option<String>,
    pub search: Option<String>,
    pub location: Option<String>,
}

impl ServiceFilter {
    /// Blank fields are left out so the server does not filter on "".
    pub fn to_query(&self) -> Vec<(String, String)> {
        [
            ("category", &self.category),
            ("search", &self.search),
            ("location", &self.location),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (key.to_string(), v.to_string()))
        })
        .collect()
    }
}
