use crate::client::ApiClient;
use crate::errors::ClientError;
use crate::models::{LoginRequest, RegisterRequest};
use crate::routes::{Navigator, Route};
use crate::session::Session;

/// Signs in and returns the dashboard for the session's role.
pub async fn login(client: &ApiClient, credentials: &LoginRequest) -> Result<Route, ClientError> {
    let token = client.auth().login(credentials).await?;
    let session = client.session().login(&token)?;
    Ok(landing_for(&session))
}

/// Creates the account, then signs in with the same credentials.
pub async fn register(client: &ApiClient, form: &RegisterRequest) -> Result<Route, ClientError> {
    let created = client.auth().register(form).await?;
    tracing::info!(user_id = created.id, role = created.role.as_str(), "registered account");
    login(client, &form.credentials()).await
}

pub fn logout(client: &ApiClient, navigator: &Navigator) {
    client.session().logout();
    navigator.navigate(Route::Landing);
}

pub fn landing_for(session: &Session) -> Route {
    Route::dashboard_for(session.user.role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;

    use crate::api::testing::{json_response, test_session, MockTransport};
    use crate::models::Role;

    fn backend(role: &'static str) -> MockTransport {
        MockTransport::new(move |req| match req.path.as_str() {
            "/auth/register" => json_response(
                200,
                json!({
                    "id": 8, "name": "Mina", "email": "mina@example.com", "role": role,
                    "age": null, "location": null, "bio": null, "mobile": null,
                    "avatar_url": null, "created_at": "2025-02-01T12:00:00"
                }),
            ),
            "/auth/login" => json_response(
                200,
                json!({"access_token": "fresh", "token_type": "bearer", "role": role, "user_id": 8, "name": "Mina"}),
            ),
            _ => json_response(404, json!({"detail": "Not Found"})),
        })
    }

    fn credentials() -> LoginRequest {
        LoginRequest {
            email: "mina@example.com".to_string(),
            password: "pw".to_string(),
        }
    }

    #[tokio::test]
    async fn test_provider_lands_on_provider_dashboard() {
        let client = ApiClient::new(Arc::new(backend("provider")), test_session());
        let route = login(&client, &credentials()).await.unwrap();
        assert_eq!(route, Route::ProviderDashboard);
        assert_eq!(client.session().current_user().unwrap().role, Role::Provider);
    }

    #[tokio::test]
    async fn test_user_lands_on_user_dashboard() {
        let client = ApiClient::new(Arc::new(backend("user")), test_session());
        let route = login(&client, &credentials()).await.unwrap();
        assert_eq!(route, Route::UserDashboard);
        assert_eq!(client.session().token().as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let transport = backend("user");
        let sent = transport.sent.clone();
        let client = ApiClient::new(Arc::new(transport), test_session());

        let route = register(
            &client,
            &RegisterRequest {
                name: "Mina".to_string(),
                email: "mina@example.com".to_string(),
                password: "pw".to_string(),
                role: Role::User,
                age: None,
                location: None,
                bio: None,
                mobile: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(route, Route::UserDashboard);
        let paths: Vec<String> = sent.lock().unwrap().iter().map(|r| r.path.clone()).collect();
        assert_eq!(paths, vec!["/auth/register", "/auth/login"]);
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_empty() {
        let transport = MockTransport::new(|_| {
            json_response(401, json!({"detail": "Invalid email or password"}))
        });
        let client = ApiClient::new(Arc::new(transport), test_session());

        let err = login(&client, &credentials()).await.unwrap_err();
        assert_eq!(err.user_message("Login failed"), "Invalid email or password");
        assert!(!client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_goes_home() {
        let client = ApiClient::new(Arc::new(backend("user")), test_session());
        let nav = Navigator::new(Route::UserDashboard);
        login(&client, &credentials()).await.unwrap();

        logout(&client, &nav);
        logout(&client, &nav);
        assert!(!client.session().is_authenticated());
        assert_eq!(nav.current(), Route::Landing);
    }
}
