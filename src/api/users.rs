use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::client::ApiClient;
use crate::errors::ClientError;
use crate::models::{User, UserUpdate};
use crate::transport::ApiRequest;

pub const MAX_AVATAR_BYTES: usize = 500_000;

pub struct UsersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn me(&self) -> Result<User, ClientError> {
        self.client.fetch(ApiRequest::get("/users/me")).await
    }

    pub async fn update(&self, update: &UserUpdate) -> Result<User, ClientError> {
        let user: User = self
            .client
            .fetch(ApiRequest::put("/users/me").json(update)?)
            .await?;
        if let Err(e) = self.client.session().update_profile(&user) {
            tracing::warn!(error = %e, "profile saved but cached copy not refreshed");
        }
        Ok(user)
    }

    pub async fn get(&self, id: i64) -> Result<User, ClientError> {
        self.client.fetch(ApiRequest::get(format!("/users/{id}"))).await
    }

    pub async fn providers(&self, location: Option<&str>) -> Result<Vec<User>, ClientError> {
        let query = location
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| vec![("location".to_string(), l.to_string())])
            .unwrap_or_default();
        self.client
            .fetch(ApiRequest::get("/users/providers/list").query(query))
            .await
    }

    /// Stores the image inline on the profile as a data URL.
    pub async fn upload_avatar(&self, image: &[u8], mime: &str) -> Result<User, ClientError> {
        let data_url = avatar_data_url(image, mime)?;
        self.update(&UserUpdate {
            avatar_url: Some(data_url),
            ..UserUpdate::default()
        })
        .await
    }
}

pub fn avatar_data_url(image: &[u8], mime: &str) -> Result<String, ClientError> {
    if !mime.starts_with("image/") {
        return Err(ClientError::Validation(format!("Not an image: {mime}")));
    }
    if image.len() > MAX_AVATAR_BYTES {
        return Err(ClientError::Validation(
            "Image too large (max 500KB)".to_string(),
        ));
    }
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(image)))
}
