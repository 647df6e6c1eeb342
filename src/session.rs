use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::db::queries;
use crate::errors::ClientError;
use crate::models::{Role, TokenResponse, User};

pub const TOKEN_KEY: &str = "sb_token";
pub const USER_KEY: &str = "sb_user";

/// The cached slice of the profile the client needs without a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(alias = "user_id")]
    pub id: i64,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

/// Holds the bearer token and cached profile, persisted under `sb_token` and
/// `sb_user`. Cloning is cheap and every clone shares the same state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

struct Inner {
    db: Arc<Mutex<Connection>>,
    current: Mutex<Option<Session>>,
    auth_tx: watch::Sender<bool>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionStore {
    /// Hydrates from storage. A missing or unreadable session starts the store
    /// signed out.
    pub fn open(db: Arc<Mutex<Connection>>) -> Self {
        let restored = {
            let conn = lock(&db);
            hydrate(&conn)
        };
        if let Some(session) = &restored {
            tracing::info!(user_id = session.user.id, role = session.user.role.as_str(), "restored session");
        }
        let (auth_tx, _) = watch::channel(restored.is_some());
        Self {
            inner: Arc::new(Inner {
                db,
                current: Mutex::new(restored),
                auth_tx,
            }),
        }
    }

    pub fn login(&self, response: &TokenResponse) -> Result<Session, ClientError> {
        if response.access_token.trim().is_empty() {
            return Err(ClientError::Validation(
                "login response did not include a token".to_string(),
            ));
        }

        let session = Session {
            token: response.access_token.clone(),
            user: SessionUser {
                id: response.user_id,
                name: response.name.clone(),
                role: response.role,
                avatar_url: None,
            },
        };
        let user_json = serde_json::to_string(&session.user)?;

        {
            let mut conn = lock(&self.inner.db);
            queries::set_items(
                &mut conn,
                &[(TOKEN_KEY, session.token.as_str()), (USER_KEY, user_json.as_str())],
            )?;
        }

        *lock(&self.inner.current) = Some(session.clone());
        self.inner.auth_tx.send_if_modified(|authed| !std::mem::replace(authed, true));

        tracing::info!(user_id = session.user.id, role = session.user.role.as_str(), "signed in");
        Ok(session)
    }

    /// Always leaves the store signed out. Safe to call repeatedly.
    pub fn logout(&self) {
        let previous = lock(&self.inner.current).take();
        self.clear(previous);
    }

    /// Signs out only while `token` is still the active one. Returns whether
    /// it did.
    pub fn logout_if_current(&self, token: &str) -> bool {
        let previous = {
            let mut current = lock(&self.inner.current);
            if current.as_ref().map(|s| s.token.as_str()) != Some(token) {
                return false;
            }
            current.take()
        };
        self.clear(previous);
        true
    }

    fn clear(&self, previous: Option<Session>) {
        {
            let conn = lock(&self.inner.db);
            if let Err(e) = queries::remove_items(&conn, &[TOKEN_KEY, USER_KEY]) {
                tracing::warn!(error = %e, "failed to clear stored session");
            }
        }

        self.inner.auth_tx.send_if_modified(|authed| std::mem::replace(authed, false));

        if let Some(session) = previous {
            tracing::info!(user_id = session.user.id, "signed out");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        lock(&self.inner.current).is_some()
    }

    pub fn token(&self) -> Option<String> {
        lock(&self.inner.current).as_ref().map(|s| s.token.clone())
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        lock(&self.inner.current).as_ref().map(|s| s.user.clone())
    }

    pub fn snapshot(&self) -> Option<Session> {
        lock(&self.inner.current).clone()
    }

    /// Refreshes the cached name and avatar after a profile edit. The role
    /// only ever comes from a login.
    pub fn update_profile(&self, user: &User) -> Result<(), ClientError> {
        let updated = {
            let current = lock(&self.inner.current);
            match current.as_ref() {
                Some(session) if session.user.id == user.id => SessionUser {
                    id: session.user.id,
                    name: user.name.clone(),
                    role: session.user.role,
                    avatar_url: user.avatar_url.clone(),
                },
                _ => return Ok(()),
            }
        };

        let user_json = serde_json::to_string(&updated)?;
        {
            let conn = lock(&self.inner.db);
            queries::set_item(&conn, USER_KEY, &user_json)?;
        }

        if let Some(session) = lock(&self.inner.current).as_mut() {
            if session.user.id == updated.id {
                session.user = updated;
            }
        }
        Ok(())
    }

    /// Follows the signed-in flag. Only real changes are published.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.auth_tx.subscribe()
    }
}

fn hydrate(conn: &Connection) -> Option<Session> {
    let token = match queries::get_item(conn, TOKEN_KEY) {
        Ok(Some(token)) if !token.trim().is_empty() => token,
        Ok(_) => return None,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read stored token");
            return None;
        }
    };

    let user = match queries::get_item(conn, USER_KEY) {
        Ok(Some(raw)) => match serde_json::from_str::<SessionUser>(&raw) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "stored profile is corrupt, starting signed out");
                return None;
            }
        },
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read stored profile");
            return None;
        }
    };

    Some(Session { token, user })
}
