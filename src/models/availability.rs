use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub id: i64,
    pub provider_id: i64,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
}

impl AvailabilitySlot {
    pub fn day_name(&self) -> &'static str {
        day_name(self.day_of_week)
    }
}

pub fn day_name(day_of_week: u8) -> &'static str {
    DAY_NAMES.get(day_of_week as usize).copied().unwrap_or("?")
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityCreate {
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
}

impl AvailabilityCreate {
    pub fn validate(&self) -> Result<(), String> {
        if self.day_of_week > 6 {
            return Err(format!("invalid day of week: {}", self.day_of_week));
        }
        let start = parse_time(&self.start_time)?;
        let end = parse_time(&self.end_time)?;
        if start >= end {
            return Err("End time must be after start time".to_string());
        }
        Ok(())
    }
}

fn parse_time(t: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(t, "%H:%M").map_err(|_| format!("invalid time: {t}"))
}
