use axum::{
    extract::{rejection::FormRejection, FromRef, State},
    routing::get,
    Form, Router,
};
use tracing::{debug, error, instrument};

use crate::{
    action::Action,
    auth::{
        dto::{AuthPage, LoginForm, RegisterForm},
        services::{create_user, login_user, AuthError},
        User,
    },
    session::{self, extractors::MaybeUser, SessionKeys},
    state::AppState,
};

const UNKNOWN_ERROR: &str = "An unknown error occurred";
const INVALID_FORM: &str = "Invalid form data";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/register", get(register_page).post(register))
}

/// Loader for the login page: already-authenticated users go home.
#[instrument(skip_all)]
async fn login_page(MaybeUser(session): MaybeUser) -> Action<AuthPage> {
    if session.is_some() {
        return Action::redirect("/");
    }
    Action::Ok(AuthPage {
        user: None,
        error: None,
    })
}

#[instrument(skip_all)]
async fn register_page(MaybeUser(session): MaybeUser) -> Action<AuthPage> {
    if session.is_some() {
        return Action::redirect("/");
    }
    Action::Ok(AuthPage {
        user: None,
        error: None,
    })
}

/// Mint the cookie and redirect home; a signing failure is a generic
/// error at this boundary.
fn session_redirect(state: &AppState, user: &User) -> Action<AuthPage> {
    let keys = SessionKeys::from_ref(state);
    match session::create_user_session(&keys, &state.config.session, user, true, "/") {
        Ok(action) => action,
        Err(e) => {
            error!(error = %e, "session creation failed");
            Action::error(UNKNOWN_ERROR)
        }
    }
}

#[instrument(skip(state, form))]
async fn login(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Action<AuthPage> {
    // A missing or malformed field is the same "Invalid form data" as a
    // failed validation, not a 422.
    let Ok(Form(form)) = form else {
        debug!("login form did not deserialize");
        return Action::error(INVALID_FORM);
    };
    let Some(form) = form.validate() else {
        return Action::error(INVALID_FORM);
    };

    match login_user(&state.db, &form.email, &form.password).await {
        Ok(user) => session_redirect(&state, &user),
        Err(e @ AuthError::InvalidCredentials) => Action::error(e.to_string()),
        Err(AuthError::Store(e)) => {
            error!(error = %e, "login failed");
            Action::error(UNKNOWN_ERROR)
        }
        Err(e) => Action::error(e.to_string()),
    }
}

#[instrument(skip(state, form))]
async fn register(
    State(state): State<AppState>,
    form: Result<Form<RegisterForm>, FormRejection>,
) -> Action<AuthPage> {
    let Ok(Form(form)) = form else {
        debug!("register form did not deserialize");
        return Action::error(INVALID_FORM);
    };
    let Some(form) = form.validate() else {
        return Action::error(INVALID_FORM);
    };

    match create_user(&state.db, &form.email, &form.username, &form.password).await {
        Ok(user) => session_redirect(&state, &user),
        Err(e @ AuthError::Creation) => Action::error(e.to_string()),
        Err(AuthError::Store(e)) => {
            error!(error = %e, "register failed");
            Action::error(UNKNOWN_ERROR)
        }
        Err(e) => Action::error(e.to_string()),
    }
}
