use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::User;

/// Reviews can be edited for this long after they are first submitted.
pub const EDIT_WINDOW_HOURS: i64 = 24;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub booking_id: i64,
    pub user_id: i64,
    pub provider_id: i64,
    pub rating: f64,
    pub feedback: Option<String>,
    #[serde(with = "super::timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub user: Option<User>,
}

impl Review {
    pub fn can_edit(&self, now: NaiveDateTime) -> bool {
        can_edit(self.created_at, now)
    }
}

/// True while less than 24 hours have passed since `created_at`. The server
/// has the final say; this only gates the edit affordance.
pub fn can_edit(created_at: NaiveDateTime, now: NaiveDateTime) -> bool {
    now - created_at < Duration::hours(EDIT_WINDOW_HOURS)
}

/// Whole hours left in the edit window, rounded up, never negative.
pub fn edit_hours_left(created_at: NaiveDateTime, now: NaiveDateTime) -> i64 {
    let remaining = Duration::hours(EDIT_WINDOW_HOURS) - (now - created_at);
    if remaining <= Duration::zero() {
        return 0;
    }
    let ms = remaining.num_milliseconds();
    (ms + 3_599_999) / 3_600_000
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewInput {
    pub booking_id: i64,
    pub rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl ReviewInput {
    pub fn validate(&self) -> Result<(), String> {
        if !(1.0..=5.0).contains(&self.rating) {
            return Err("Rating must be between 1 and 5".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AverageRating {
    pub provider_id: i64,
    pub avg_rating: f64,
    pub total_reviews: i64,
}
