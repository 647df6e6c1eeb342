use crate::client::ApiClient;
use crate::errors::ClientError;
use crate::models::PlatformStats;
use crate::transport::ApiRequest;

pub struct StatsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> StatsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> Result<PlatformStats, ClientError> {
        self.client.fetch(ApiRequest::get("/stats")).await
    }
}
