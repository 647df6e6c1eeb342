use crate::client::ApiClient;
use crate::errors::ClientError;
use crate::models::{AvailabilityCreate, AvailabilitySlot};
use crate::transport::ApiRequest;

pub struct AvailabilityApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AvailabilityApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn mine(&self) -> Result<Vec<AvailabilitySlot>, ClientError> {
        self.client.fetch(ApiRequest::get("/availability/")).await
    }

    pub async fn for_provider(&self, provider_id: i64) -> Result<Vec<AvailabilitySlot>, ClientError> {
        self.client
            .fetch(ApiRequest::get(format!("/availability/{provider_id}")))
            .await
    }

    pub async fn set(&self, slot: &AvailabilityCreate) -> Result<AvailabilitySlot, ClientError> {
        slot.validate().map_err(ClientError::Validation)?;
        self.client
            .fetch(ApiRequest::post("/availability/").json(slot)?)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.client
            .execute(ApiRequest::delete(format!("/availability/{id}")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::api::testing::{client_returning, last_request};
    use crate::models::AvailabilityCreate;

    #[tokio::test]
    async fn test_set_slot() {
        let (client, sent) = client_returning(
            200,
            json!({"id": 2, "provider_id": 3, "day_of_week": 1, "start_time": "09:00", "end_time": "13:00"}),
        );
        let slot = client
            .availability()
            .set(&AvailabilityCreate {
                day_of_week: 1,
                start_time: "09:00".to_string(),
                end_time: "13:00".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(slot.day_name(), "Tue");
        assert_eq!(last_request(&sent).path, "/availability/");
    }
}
