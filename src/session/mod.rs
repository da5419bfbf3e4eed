//! Cookie session service: mints, reads and destroys the signed
//! `__session` cookie. There is no server-side session store; the
//! sanitized user record travels inside the cookie and the signing
//! secret is the only server-held state, so revocation means rotating
//! the secret or waiting out the expiry.

use crate::action::Action;
use crate::auth::User;
use crate::config::SessionConfig;
use crate::state::AppState;
use axum::Router;

pub mod cookie;
pub mod extractors;
pub mod handlers;
mod keys;

pub use keys::{SessionKeys, UserSession};

#[cfg(test)]
pub(crate) use keys::test_user;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::session_routes())
}

/// The single write path for session state: strip the password hash,
/// sign the rest into the cookie, and redirect. `remember` keeps the
/// cookie for the full expiry instead of the browser session.
pub fn create_user_session<T>(
    keys: &SessionKeys,
    config: &SessionConfig,
    user: &User,
    remember: bool,
    redirect_url: &str,
) -> anyhow::Result<Action<T>> {
    let token = keys.sign(user)?;
    let cookie = cookie::session_cookie(token, remember, config);
    Ok(Action::redirect_with_cookie(redirect_url, cookie.to_string()))
}

/// Destroy-cookie redirect to the home page.
pub fn logout<T>(config: &SessionConfig) -> Action<T> {
    Action::redirect_with_cookie("/", cookie::destroy_cookie(config).to_string())
}
