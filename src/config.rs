use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_url: String,
    pub storage_path: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            storage_path: "skillbridge.db".to_string(),
            poll_interval: Duration::from_secs(15),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: env::var("SKILLBRIDGE_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            storage_path: env::var("SKILLBRIDGE_STORAGE_PATH").unwrap_or(defaults.storage_path),
            poll_interval: secs_var("SKILLBRIDGE_POLL_INTERVAL_SECS")
                .unwrap_or(defaults.poll_interval),
            request_timeout: secs_var("SKILLBRIDGE_REQUEST_TIMEOUT_SECS")
                .unwrap_or(defaults.request_timeout),
        }
    }
}

fn secs_var(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}
