mod auth;
mod availability;
mod bookings;
mod calendar;
mod notifications;
mod reviews;
mod services;
mod stats;
mod users;

pub use auth::AuthApi;
pub use availability::AvailabilityApi;
pub use bookings::BookingsApi;
pub use calendar::CalendarApi;
pub use notifications::NotificationsApi;
pub use reviews::ReviewsApi;
pub use services::ServicesApi;
pub use stats::StatsApi;
pub use users::{UsersApi, MAX_AVATAR_BYTES};
