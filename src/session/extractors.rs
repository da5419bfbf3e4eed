use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::Redirect,
};
use tracing::debug;

use crate::session::cookie::token_from_headers;
use crate::session::keys::{SessionKeys, UserSession};

/// Current session if there is one; never rejects. Backing for routes
/// that only branch on "already logged in?".
pub struct MaybeUser(pub Option<UserSession>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = SessionKeys::from_ref(state);
        let session = token_from_headers(&parts.headers).and_then(|token| keys.verify(&token));
        Ok(MaybeUser(session))
    }
}

/// Access-control checkpoint for protected routes: yields the sanitized
/// session payload or redirects to the login page.
pub struct SessionUser(pub UserSession);

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let MaybeUser(session) = MaybeUser::from_request_parts(parts, state)
            .await
            .unwrap_or(MaybeUser(None));
        match session {
            Some(user) => Ok(SessionUser(user)),
            None => {
                debug!("no session, redirecting to login");
                Err(Redirect::to("/login"))
            }
        }
    }
}
