use std::sync::{Arc, Mutex};

use anyhow::Context;

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::db;
use crate::routes::{Navigator, Route};
use crate::session::SessionStore;

/// Everything a view needs, built once at startup and handed down.
pub struct AppContext {
    pub config: ClientConfig,
    pub session: SessionStore,
    pub client: Arc<ApiClient>,
    pub navigator: Navigator,
}

impl AppContext {
    pub fn init(config: ClientConfig) -> anyhow::Result<Self> {
        let conn = db::init_db(&config.storage_path)?;
        let session = SessionStore::open(Arc::new(Mutex::new(conn)));
        let client = ApiClient::from_config(&config, session.clone())
            .context("failed to build API client")?;
        Ok(Self::assemble(config, session, client))
    }

    /// Wires the forced redirect to the login view on any 401.
    pub fn assemble(config: ClientConfig, session: SessionStore, client: ApiClient) -> Self {
        let navigator = Navigator::default();
        let nav = navigator.clone();
        client.on_unauthorized(move || nav.navigate(Route::Login));

        Self {
            config,
            session,
            client: Arc::new(client),
            navigator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::api::testing::{json_response, sign_in, test_session, MockTransport};
    use crate::errors::ClientError;
    use crate::models::Role;

    #[tokio::test]
    async fn test_401_redirects_to_login() {
        let session = test_session();
        sign_in(&session, "stale", Role::User);
        let transport = MockTransport::new(|_| {
            json_response(401, json!({"detail": "Could not validate credentials"}))
        });
        let client = ApiClient::new(Arc::new(transport), session.clone());
        let ctx = AppContext::assemble(ClientConfig::default(), session, client);
        ctx.navigator.navigate(Route::UserDashboard);

        let err = ctx.client.bookings().as_user().await.unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized { .. }));
        assert!(!ctx.session.is_authenticated());
        assert_eq!(ctx.navigator.current(), Route::Login);
    }

    #[test]
    fn test_init_with_memory_storage() {
        let config = ClientConfig {
            storage_path: ":memory:".to_string(),
            ..ClientConfig::default()
        };
        let ctx = AppContext::init(config).unwrap();
        assert!(!ctx.session.is_authenticated());
        assert_eq!(ctx.navigator.current(), Route::Landing);
    }
}
