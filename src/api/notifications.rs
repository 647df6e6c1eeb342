use crate::client::ApiClient;
use crate::errors::ClientError;
use crate::models::{Notification, UnreadCount};
use crate::transport::ApiRequest;

pub struct NotificationsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> NotificationsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Notification>, ClientError> {
        self.client.fetch(ApiRequest::get("/notifications/")).await
    }

    pub async fn unread_count(&self) -> Result<u32, ClientError> {
        let count: UnreadCount = self
            .client
            .fetch(ApiRequest::get("/notifications/unread-count"))
            .await?;
        Ok(count.count)
    }

    pub async fn mark_read(&self, id: i64) -> Result<(), ClientError> {
        self.client
            .execute(ApiRequest::put(format!("/notifications/{id}/read")))
            .await
    }

    pub async fn mark_all_read(&self) -> Result<(), ClientError> {
        self.client
            .execute(ApiRequest::put("/notifications/read-all"))
            .await
    }
}
