use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Holiday,
    #[default]
    Event,
    Reminder,
    Booking,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: i64,
    pub provider_id: i64,
    pub title: String,
    pub event_type: EventType,
    pub start_datetime: String,
    pub end_datetime: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarEventCreate {
    pub title: String,
    pub event_type: EventType,
    pub start_datetime: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_datetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}
