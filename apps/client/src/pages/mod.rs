// Page controllers: each one mounts (session gate + data fetch), holds its
// own form state, and exposes the actions its screen offers.

pub mod home;
pub mod login;
pub mod profile;
pub mod register;
pub mod resume;

#[cfg(test)]
pub mod testing;

use std::fmt;

use tracing::info;

use crate::errors::ClientError;
use crate::session::TokenStore;

/// Navigation targets.
#[allow(dead_code)] // not every route is a redirect target from the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Profile,
    Resume,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Profile => "/profile",
            Route::Resume => "/resume",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Result of mounting a page.
#[derive(Debug)]
pub enum PageLoad<T> {
    Redirect(Route),
    Ready(T),
}

/// Gate for pages that need a signed-in user.
/// Returns the redirect to take when no token is stored.
pub fn require_session(tokens: &dyn TokenStore) -> Option<Route> {
    if tokens.has_token() {
        None
    } else {
        info!("No session token; redirecting to {}", Route::Login);
        Some(Route::Login)
    }
}

/// Gate for the sign-in pages: an existing session goes straight to the profile.
pub fn skip_if_signed_in(tokens: &dyn TokenStore) -> Option<Route> {
    tokens.has_token().then_some(Route::Profile)
}

/// Persists the token handed out by register/login. Next stop is the profile.
pub(crate) fn complete_sign_in(tokens: &dyn TokenStore, token: &str) -> Result<Route, ClientError> {
    tokens.set(token)?;
    info!("Signed in; redirecting to {}", Route::Profile);
    Ok(Route::Profile)
}

/// Trims a form field and rejects it when nothing is left.
pub(crate) fn required(field: &str, label: &str) -> Result<String, ClientError> {
    let value = field.trim();
    if value.is_empty() {
        Err(ClientError::Validation(format!("{label} must not be empty")))
    } else {
        Ok(value.to_string())
    }
}

/// Passwords are sent exactly as typed; only an empty one is rejected.
pub(crate) fn password(field: &str) -> Result<String, ClientError> {
    if field.is_empty() {
        Err(ClientError::Validation("Password must not be empty".to_string()))
    } else {
        Ok(field.to_string())
    }
}
