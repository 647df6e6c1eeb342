use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::api::{
    AuthApi, AvailabilityApi, BookingsApi, CalendarApi, NotificationsApi, ReviewsApi, ServicesApi,
    StatsApi, UsersApi,
};
use crate::config::ClientConfig;
use crate::errors::ClientError;
use crate::interceptor::AuthInterceptor;
use crate::session::SessionStore;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

/// The single gateway every page-level call goes through.
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    interceptor: AuthInterceptor,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, session: SessionStore) -> Self {
        Self {
            transport,
            interceptor: AuthInterceptor::new(session),
        }
    }

    pub fn from_config(config: &ClientConfig, session: SessionStore) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(config.api_url.clone(), config.request_timeout)?;
        Ok(Self::new(Arc::new(transport), session))
    }

    /// Registers the callback run after a 401 has cleared the session.
    pub fn on_unauthorized<F>(&self, handler: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.interceptor.on_unauthorized(handler);
    }

    pub fn session(&self) -> &SessionStore {
        self.interceptor.session()
    }

    /// Sends a request and returns the raw response if it succeeded. Failures
    /// are returned once; nothing is retried.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let request = self.interceptor.prepare(request);
        let response = match self.transport.send(request.clone()).await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(method = %request.method, path = %request.path, error = %e, "request failed");
                return Err(e);
            }
        };

        self.interceptor.inspect(&request, &response);

        if !response.is_success() {
            let err = ClientError::from_status(response.status, &response.body);
            tracing::debug!(method = %request.method, path = %request.path, error = %err, "request rejected");
            return Err(err);
        }

        Ok(response)
    }

    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        self.send(request).await?.json()
    }

    pub async fn execute(&self, request: ApiRequest) -> Result<(), ClientError> {
        self.send(request).await.map(|_| ())
    }

    // ── Call groups ──

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    pub fn services(&self) -> ServicesApi<'_> {
        ServicesApi::new(self)
    }

    pub fn bookings(&self) -> BookingsApi<'_> {
        BookingsApi::new(self)
    }

    pub fn reviews(&self) -> ReviewsApi<'_> {
        ReviewsApi::new(self)
    }

    pub fn calendar(&self) -> CalendarApi<'_> {
        CalendarApi::new(self)
    }

    pub fn notifications(&self) -> NotificationsApi<'_> {
        NotificationsApi::new(self)
    }

    pub fn availability(&self) -> AvailabilityApi<'_> {
        AvailabilityApi::new(self)
    }

    pub fn stats(&self) -> StatsApi<'_> {
        StatsApi::new(self)
    }
}
