use axum::{extract::State, routing::post, Router};
use tracing::instrument;

use crate::action::Action;
use crate::session;
use crate::state::AppState;

pub fn session_routes() -> Router<AppState> {
    Router::new().route("/logout", post(logout))
}

#[instrument(skip(state))]
async fn logout(State(state): State<AppState>) -> Action<()> {
    session::logout(&state.config.session)
}
