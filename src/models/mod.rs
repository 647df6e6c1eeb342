pub mod availability;
pub mod booking;
pub mod calendar;
pub mod notification;
pub mod review;
pub mod service;
pub mod stats;
pub mod timestamp;
pub mod user;

pub use availability::{AvailabilityCreate, AvailabilitySlot};
pub use booking::{Booking, BookingCreate, BookingStatus, BookingStatusUpdate};
pub use calendar::{CalendarEvent, CalendarEventCreate, EventType};
pub use notification::{Notification, UnreadCount};
pub use review::{AverageRating, Review, ReviewInput};
pub use service::{Service, ServiceCreate, ServiceFilter, ServiceUpdate};
pub use stats::PlatformStats;
pub use user::{LoginRequest, RegisterRequest, Role, TokenResponse, User, UserUpdate};
