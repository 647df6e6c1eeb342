use crate::client::ApiClient;
use crate::errors::ClientError;
use crate::models::{LoginRequest, RegisterRequest, TokenResponse, User};
use crate::transport::ApiRequest;

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn register(&self, form: &RegisterRequest) -> Result<User, ClientError> {
        self.client
            .fetch(ApiRequest::post("/auth/register").json(form)?)
            .await
    }

    pub async fn login(&self, credentials: &LoginRequest) -> Result<TokenResponse, ClientError> {
        self.client
            .fetch(ApiRequest::post("/auth/login").json(credentials)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::json;

    use crate::api::testing::{client_returning, last_request};
    use crate::models::{LoginRequest, Role};

    #[tokio::test]
    async fn test_login_posts_credentials() {
        let (client, sent) = client_returning(
            200,
            json!({"access_token":"t0k","token_type":"bearer","role":"provider","user_id":5,"name":"Ravi"}),
        );

        let token = client
            .auth()
            .login(&LoginRequest {
                email: "ravi@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(token.role, Role::Provider);

        let req = last_request(&sent);
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.path, "/auth/login");
        assert_eq!(req.body.as_ref().unwrap()["email"], "ravi@example.com");
        assert!(req.header("Authorization").is_none());
    }
}
