use std::sync::{Arc, Mutex, PoisonError};

use crate::session::SessionStore;
use crate::transport::{ApiRequest, ApiResponse};

pub type UnauthorizedHandler = Arc<dyn Fn() + Send + Sync>;

/// Adds the bearer token to outgoing requests and reacts to 401 responses by
/// signing out and calling the one registered handler.
pub struct AuthInterceptor {
    session: SessionStore,
    handler: Mutex<Option<UnauthorizedHandler>>,
}

impl AuthInterceptor {
    pub fn new(session: SessionStore) -> Self {
        Self {
            session,
            handler: Mutex::new(None),
        }
    }

    /// Replaces any handler registered earlier.
    pub fn on_unauthorized<F>(&self, handler: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        *self.handler.lock().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(handler));
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn prepare(&self, mut request: ApiRequest) -> ApiRequest {
        if let Some(token) = self.session.token() {
            request.set_header("Authorization", format!("Bearer {token}"));
        }
        request
    }

    /// Ends the session on a 401, but only when the request carried the token
    /// that is still active. A late 401 for an earlier token or an anonymous
    /// call leaves the current session alone.
    pub fn inspect(&self, request: &ApiRequest, response: &ApiResponse) {
        if response.status != 401 {
            return;
        }

        let Some(token) = request
            .header("Authorization")
            .and_then(|value| value.strip_prefix("Bearer "))
        else {
            tracing::debug!(path = %request.path, "anonymous request unauthorized");
            return;
        };
        if !self.session.logout_if_current(token) {
            tracing::debug!(path = %request.path, "401 for a token that is no longer active");
            return;
        }
        tracing::warn!(path = %request.path, "request unauthorized, session cleared");

        let handler = self
            .handler
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(handler) = handler {
            handler();
        }
    }
}
