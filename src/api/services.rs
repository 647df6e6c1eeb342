use crate::client::ApiClient;
use crate::errors::ClientError;
use crate::models::{Service, ServiceCreate, ServiceFilter, ServiceUpdate};
use crate::transport::ApiRequest;

pub struct ServicesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ServicesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filter: &ServiceFilter) -> Result<Vec<Service>, ClientError> {
        self.client
            .fetch(ApiRequest::get("/services/").query(filter.to_query()))
            .await
    }

    pub async fn categories(&self) -> Result<Vec<String>, ClientError> {
        self.client.fetch(ApiRequest::get("/services/categories")).await
    }

    /// Listings owned by the signed-in provider.
    pub async fn mine(&self) -> Result<Vec<Service>, ClientError> {
        self.client.fetch(ApiRequest::get("/services/my")).await
    }

    pub async fn get(&self, id: i64) -> Result<Service, ClientError> {
        self.client.fetch(ApiRequest::get(format!("/services/{id}"))).await
    }

    pub async fn by_provider(&self, provider_id: i64) -> Result<Vec<Service>, ClientError> {
        self.client
            .fetch(ApiRequest::get(format!("/services/provider/{provider_id}")))
            .await
    }

    pub async fn create(&self, service: &ServiceCreate) -> Result<Service, ClientError> {
        self.client
            .fetch(ApiRequest::post("/services/").json(service)?)
            .await
    }

    pub async fn update(&self, id: i64, update: &ServiceUpdate) -> Result<Service, ClientError> {
        self.client
            .fetch(ApiRequest::put(format!("/services/{id}")).json(update)?)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.client
            .execute(ApiRequest::delete(format!("/services/{id}")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::json;

    use crate::api::testing::{client_returning, last_request, sign_in};
    use crate::models::{Role, ServiceFilter};

    #[tokio::test]
    async fn test_list_own_services_carries_token() {
        let (client, sent) = client_returning(200, json!([]));
        sign_in(client.session(), "abc", Role::Provider);

        client.services().mine().await.unwrap();

        let req = last_request(&sent);
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.path, "/services/my");
        assert_eq!(req.header("Authorization"), Some("Bearer abc"));
    }

    #[tokio::test]
    async fn test_list_with_filter() {
        let (client, sent) = client_returning(200, json!([]));
        client
            .services()
            .list(&ServiceFilter {
                category: Some("Electrician".to_string()),
                search: None,
                location: Some("Delhi".to_string()),
            })
            .await
            .unwrap();

        let req = last_request(&sent);
        assert_eq!(req.path, "/services/");
        assert_eq!(
            req.query,
            vec![
                ("category".to_string(), "Electrician".to_string()),
                ("location".to_string(), "Delhi".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_delete_service() {
        let (client, sent) = client_returning(200, json!({"message": "Service deleted"}));
        client.services().delete(17).await.unwrap();
        let req = last_request(&sent);
        assert_eq!(req.method, Method::DELETE);
        assert_eq!(req.path, "/services/17");
    }
}
