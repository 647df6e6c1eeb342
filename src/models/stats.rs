use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformStats {
    pub total_services: i64,
    pub total_providers: i64,
    pub avg_rating: f64,
}
