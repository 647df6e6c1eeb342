pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod interceptor;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod transport;

pub use client::ApiClient;
pub use errors::{ClientError, ErrorKind};
pub use routes::{Navigator, Route};
pub use session::{Session, SessionStore, SessionUser};
pub use state::AppContext;
