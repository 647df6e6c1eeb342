use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    #[serde(with = "super::timestamp")]
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UnreadCount {
    #[serde(alias = "unread_count")]
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unread_count_accepts_both_field_names() {
        let a: UnreadCount = serde_json::from_str(r#"{"count":4}"#).unwrap();
        let b: UnreadCount = serde_json::from_str(r#"{"unread_count":7}"#).unwrap();
        assert_eq!(a.count, 4);
        assert_eq!(b.count, 7);
    }
}
