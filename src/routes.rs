use std::fmt;

use tokio::sync::watch;

use crate::models::Role;
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Register,
    Search,
    ProviderProfile(i64),
    ProviderDashboard,
    UserDashboard,
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Route::Landing,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/search" => Route::Search,
            "/dashboard/provider" => Route::ProviderDashboard,
            "/dashboard/user" => Route::UserDashboard,
            other => other
                .strip_prefix("/provider/")
                .and_then(|id| id.parse().ok())
                .map(Route::ProviderProfile)
                .unwrap_or_else(|| Route::NotFound(path.to_string())),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Search => "/search".to_string(),
            Route::ProviderProfile(id) => format!("/provider/{id}"),
            Route::ProviderDashboard => "/dashboard/provider".to_string(),
            Route::UserDashboard => "/dashboard/user".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn dashboard_for(role: Role) -> Self {
        match role {
            Role::Provider => Route::ProviderDashboard,
            Role::User => Route::UserDashboard,
        }
    }

    /// The role a view is reserved for, if any.
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Route::ProviderDashboard => Some(Role::Provider),
            Route::UserDashboard => Some(Role::User),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(Route),
}

/// Dashboards need a session, and the session's role must match the one the
/// dashboard is for.
pub fn guard(route: &Route, session: Option<&Session>) -> Access {
    let Some(required) = route.required_role() else {
        return Access::Allow;
    };
    match session {
        None => Access::Redirect(Route::Login),
        Some(s) if s.user.role != required => Access::Redirect(Route::Landing),
        Some(_) => Access::Allow,
    }
}

/// Tracks the current view. Clones share the same state.
#[derive(Clone)]
pub struct Navigator {
    tx: watch::Sender<Route>,
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    pub fn navigate(&self, route: Route) {
        tracing::debug!(to = %route, "navigate");
        self.tx.send_replace(route);
    }

    /// Navigates to `route`, or wherever the guard sends the current session.
    pub fn navigate_guarded(&self, route: Route, session: Option<&Session>) -> Route {
        let target = match guard(&route, session) {
            Access::Allow => route,
            Access::Redirect(to) => to,
        };
        self.navigate(target.clone());
        target
    }

    pub fn current(&self) -> Route {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.tx.subscribe()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Landing)
    }
}
