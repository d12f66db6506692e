//! Route guard - navigation decisions from session state.
//!
//! While the session is loading no decision is made. Once loaded,
//! anonymous visitors of protected routes go to the login route carrying
//! the requested location, and signed-in visitors of guest-only routes
//! (login, sign-up) go to the landing route.

use crate::config::RoutesConfig;

use super::SessionState;

/// Who may see a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone.
    Public,
    /// Signed-in users only.
    RequireAuth,
    /// Anonymous visitors only.
    GuestOnly,
}

/// The application's routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Home,
    Login,
    SignUp,
    Dashboard,
}

impl AppRoute {
    pub const ALL: [AppRoute; 4] = [
        AppRoute::Home,
        AppRoute::Login,
        AppRoute::SignUp,
        AppRoute::Dashboard,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            AppRoute::Home => "/",
            AppRoute::Login => "/login",
            AppRoute::SignUp => "/signup",
            AppRoute::Dashboard => "/dashboard",
        }
    }

    pub fn access(&self) -> Access {
        match self {
            AppRoute::Home => Access::Public,
            AppRoute::Login | AppRoute::SignUp => Access::GuestOnly,
            AppRoute::Dashboard => Access::RequireAuth,
        }
    }

    /// Route for an exact path, ignoring any query string.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        Self::ALL.into_iter().find(|route| route.path() == path)
    }
}

/// Outcome of guarding one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still loading; show a neutral waiting state.
    Loading,
    /// Show the requested route.
    Render,
    /// Navigate elsewhere, replacing the current history entry.
    Redirect {
        to: String,
        /// Where to go back to after signing in.
        return_to: Option<String>,
    },
}

/// Applies access rules to navigation requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    login_path: String,
    landing_path: String,
}

impl RouteGuard {
    pub fn new(login_path: impl Into<String>, landing_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            landing_path: landing_path.into(),
        }
    }

    pub fn from_config(config: &RoutesConfig) -> Self {
        Self::new(config.login_path.clone(), config.landing_path.clone())
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn landing_path(&self) -> &str {
        &self.landing_path
    }

    /// Decides what to do with a request for `requested` under `access`.
    pub fn decide(&self, access: Access, requested: &str, state: &SessionState) -> GuardDecision {
        if state.loading {
            return GuardDecision::Loading;
        }

        match (access, state.is_authenticated()) {
            (Access::RequireAuth, false) => GuardDecision::Redirect {
                to: self.login_path.clone(),
                return_to: Some(requested.to_string()),
            },
            (Access::GuestOnly, true) => GuardDecision::Redirect {
                to: self.landing_path.clone(),
                return_to: None,
            },
            _ => GuardDecision::Render,
        }
    }

    /// Guards a known application route.
    pub fn decide_route(&self, route: AppRoute, state: &SessionState) -> GuardDecision {
        self.decide(route.access(), route.path(), state)
    }

    /// Where to go after a successful sign-in.
    ///
    /// Honours a remembered location when it is a local path that is not
    /// itself guest-only; otherwise the landing route.
    pub fn post_login_target(&self, return_to: Option<&str>) -> String {
        match return_to {
            Some(path) if is_local_path(path) && !self.is_guest_only(path) => path.to_string(),
            _ => self.landing_path.clone(),
        }
    }

    fn is_guest_only(&self, path: &str) -> bool {
        path == self.login_path
            || AppRoute::from_path(path).map_or(false, |route| route.access() == Access::GuestOnly)
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::from_config(&RoutesConfig::default())
    }
}

/// `/dashboard` yes; `https://evil.example`, `//evil.example` and `dashboard` no.
fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//")
}
