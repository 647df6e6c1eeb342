use crate::client::ApiClient;
use crate::errors::ClientError;
use crate::models::{Booking, BookingCreate, BookingStatus, BookingStatusUpdate};
use crate::transport::ApiRequest;

pub struct BookingsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> BookingsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, booking: &BookingCreate) -> Result<Booking, ClientError> {
        self.client
            .fetch(ApiRequest::post("/bookings/").json(booking)?)
            .await
    }

    pub async fn as_user(&self) -> Result<Vec<Booking>, ClientError> {
        self.client.fetch(ApiRequest::get("/bookings/user")).await
    }

    pub async fn as_provider(&self) -> Result<Vec<Booking>, ClientError> {
        self.client.fetch(ApiRequest::get("/bookings/provider")).await
    }

    pub async fn update_status(
        &self,
        id: i64,
        status: BookingStatus,
    ) -> Result<Booking, ClientError> {
        self.client
            .fetch(
                ApiRequest::put(format!("/bookings/{id}/status"))
                    .json(&BookingStatusUpdate { status })?,
            )
            .await
    }
}
