use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{Review, Role, Service, User};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub provider_id: i64,
    pub service_id: i64,
    pub problem_description: Option<String>,
    pub booking_date: String,
    pub booking_time: String,
    pub status: BookingStatus,
    #[serde(with = "super::timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub provider: Option<User>,
    #[serde(default)]
    pub service: Option<Service>,
    #[serde(default)]
    pub review: Option<Review>,
}

impl Booking {
    /// One review per booking, and only after the job is done.
    pub fn can_review(&self) -> bool {
        self.status == BookingStatus::Completed && self.review.is_none()
    }

    pub fn scheduled_at(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::parse_from_str(&self.booking_date, "%Y-%m-%d").ok()?;
        let time = NaiveTime::parse_from_str(&self.booking_time, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&self.booking_time, "%H:%M:%S"))
            .ok()?;
        Some(date.and_time(time))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Accepted,
    Ongoing,
    Completed,
    Rejected,
    Disputed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Accepted => "accepted",
            BookingStatus::Ongoing => "ongoing",
            BookingStatus::Completed => "completed",
            BookingStatus::Rejected => "rejected",
            BookingStatus::Disputed => "disputed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "accepted" => Some(BookingStatus::Accepted),
            "ongoing" => Some(BookingStatus::Ongoing),
            "completed" => Some(BookingStatus::Completed),
            "rejected" => Some(BookingStatus::Rejected),
            "disputed" => Some(BookingStatus::Disputed),
            _ => None,
        }
    }

    pub fn next_statuses(&self) -> &'static [BookingStatus] {
        match self {
            BookingStatus::Pending => &[BookingStatus::Accepted, BookingStatus::Rejected],
            BookingStatus::Accepted => &[BookingStatus::Ongoing, BookingStatus::Rejected],
            BookingStatus::Ongoing => &[BookingStatus::Completed],
            BookingStatus::Completed => &[BookingStatus::Disputed],
            BookingStatus::Rejected | BookingStatus::Disputed => &[],
        }
    }

    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        self.next_statuses().contains(&next)
    }

    /// Who is allowed to move a booking into this status.
    pub fn actor(&self) -> Option<Role> {
        match self {
            BookingStatus::Accepted
            | BookingStatus::Rejected
            | BookingStatus::Ongoing
            | BookingStatus::Completed => Some(Role::Provider),
            BookingStatus::Disputed => Some(Role::User),
            BookingStatus::Pending => None,
        }
    }

    /// Statuses `role` may move this booking into from where it is now.
    pub fn actions_for(&self, role: Role) -> Vec<BookingStatus> {
        self.next_statuses()
            .iter()
            .copied()
            .filter(|next| next.actor() == Some(role))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingCreate {
    pub service_id: i64,
    pub provider_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_description: Option<String>,
    pub booking_date: String,
    pub booking_time: String,
}

impl BookingCreate {
    pub fn new(
        service_id: i64,
        provider_id: i64,
        date: NaiveDate,
        time: NaiveTime,
        problem_description: Option<String>,
    ) -> Self {
        Self {
            service_id,
            provider_id,
            problem_description: problem_description.filter(|d| !d.trim().is_empty()),
            booking_date: date.format("%Y-%m-%d").to_string(),
            booking_time: time.format("%H:%M").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingStatusUpdate {
    pub status: BookingStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Accepted));
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Rejected));
        assert!(!BookingStatus::Pending.can_transition_to(BookingStatus::Completed));
        assert!(BookingStatus::Accepted.can_transition_to(BookingStatus::Ongoing));
        assert!(BookingStatus::Ongoing.can_transition_to(BookingStatus::Completed));
        assert!(BookingStatus::Completed.can_transition_to(BookingStatus::Disputed));
        assert!(BookingStatus::Rejected.next_statuses().is_empty());
        assert!(BookingStatus::Disputed.next_statuses().is_empty());
    }

    #[test]
    fn test_actions_by_role() {
        assert_eq!(
            BookingStatus::Pending.actions_for(Role::Provider),
            vec![BookingStatus::Accepted, BookingStatus::Rejected]
        );
        assert!(BookingStatus::Pending.actions_for(Role::User).is_empty());
        assert_eq!(
            BookingStatus::Completed.actions_for(Role::User),
            vec![BookingStatus::Disputed]
        );
        assert!(BookingStatus::Completed.actions_for(Role::Provider).is_empty());
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Accepted,
            BookingStatus::Ongoing,
            BookingStatus::Completed,
            BookingStatus::Rejected,
            BookingStatus::Disputed,
        ] {
            assert_eq!(BookingStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(BookingStatus::parse("cancelled"), None);
    }

    #[test]
    fn test_booking_create_formats_date_and_time() {
        let req = BookingCreate::new(
            3,
            7,
            NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
            NaiveTime::from_hms_opt(9, 5, 0).unwrap(),
            Some("  ".to_string()),
        );
        assert_eq!(req.booking_date, "2025-06-05");
        assert_eq!(req.booking_time, "09:05");
        assert!(req.problem_description.is_none());

        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("problem_description").is_none());
    }

    #[test]
    fn test_booking_from_server_json() {
        let json = r#"{
            "id": 11, "user_id": 2, "provider_id": 5, "service_id": 9,
            "problem_description": "Leaking tap",
            "booking_date": "2025-06-15", "booking_time": "14:00",
            "status": "completed",
            "created_at": "2025-06-01T08:30:00.000123",
            "user": null, "provider": null, "service": null, "review": null
        }"#;
        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.status, BookingStatus::Completed);
        assert!(booking.can_review());
        assert_eq!(
            booking.scheduled_at().unwrap().format("%Y-%m-%d %H:%M").to_string(),
            "2025-06-15 14:00"
        );
    }
}
