use crate::client::ApiClient;
use crate::errors::ClientError;
use crate::models::{CalendarEvent, CalendarEventCreate};
use crate::transport::ApiRequest;

pub struct CalendarApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CalendarApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<CalendarEvent>, ClientError> {
        self.client.fetch(ApiRequest::get("/calendar/")).await
    }

    pub async fn create(&self, event: &CalendarEventCreate) -> Result<CalendarEvent, ClientError> {
        self.client
            .fetch(ApiRequest::post("/calendar/").json(event)?)
            .await
    }

    pub async fn update(
        &self,
        id: i64,
        event: &CalendarEventCreate,
    ) -> Result<CalendarEvent, ClientError> {
        self.client
            .fetch(ApiRequest::put(format!("/calendar/{id}")).json(event)?)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.client
            .execute(ApiRequest::delete(format!("/calendar/{id}")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::api::testing::{client_returning, last_request};
    use crate::models::{CalendarEventCreate, EventType};

    #[tokio::test]
    async fn test_create_event() {
        let (client, sent) = client_returning(
            200,
            json!({
                "id": 1, "provider_id": 3, "title": "Diwali", "event_type": "holiday",
                "start_datetime": "2025-10-20T00:00", "end_datetime": null, "color": "#f59e0b"
            }),
        );
        let event = client
            .calendar()
            .create(&CalendarEventCreate {
                title: "Diwali".to_string(),
                event_type: EventType::Holiday,
                start_datetime: "2025-10-20T00:00".to_string(),
                end_datetime: None,
                color: Some("#f59e0b".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(event.event_type, EventType::Holiday);

        let body = last_request(&sent).body.unwrap();
        assert_eq!(body["event_type"], "holiday");
        assert!(body.get("end_datetime").is_none());
    }
}
