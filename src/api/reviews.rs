use crate::client::ApiClient;
use crate::errors::ClientError;
use crate::models::{AverageRating, Review, ReviewInput};
use crate::transport::ApiRequest;

pub struct ReviewsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ReviewsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn submit(&self, review: &ReviewInput) -> Result<Review, ClientError> {
        review.validate().map_err(ClientError::Validation)?;
        self.client
            .fetch(ApiRequest::post("/reviews/").json(review)?)
            .await
    }

    /// The server rejects edits once the 24 hour window has closed.
    pub async fn edit(&self, booking_id: i64, review: &ReviewInput) -> Result<Review, ClientError> {
        review.validate().map_err(ClientError::Validation)?;
        self.client
            .fetch(ApiRequest::put(format!("/reviews/{booking_id}")).json(review)?)
            .await
    }

    pub async fn for_booking(&self, booking_id: i64) -> Result<Review, ClientError> {
        self.client
            .fetch(ApiRequest::get(format!("/reviews/booking/{booking_id}")))
            .await
    }

    pub async fn for_provider(&self, provider_id: i64) -> Result<Vec<Review>, ClientError> {
        self.client
            .fetch(ApiRequest::get(format!("/reviews/provider/{provider_id}")))
            .await
    }

    pub async fn average(&self, provider_id: i64) -> Result<AverageRating, ClientError> {
        self.client
            .fetch(ApiRequest::get(format!("/reviews/provider/{provider_id}/avg")))
            .await
    }
}
