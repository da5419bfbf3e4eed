use axum::{
    extract::{rejection::FormRejection, State},
    routing::{get, post},
    Form, Json, Router,
};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    action::Action,
    guestbook::{
        dto::{GuestBookForm, GuestBookOutcome, HomePage},
        repo,
    },
    session::extractors::SessionUser,
    state::AppState,
};

const ADD_ERROR: &str = "Error adding to guest book";
const FIELDS_REQUIRED: &str = "Name and email are required";

pub fn guestbook_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/guestbook", post(sign))
}

/// Home loader. The `SessionUser` extractor already bounced anonymous
/// visitors to the login page by the time this body runs.
#[instrument(skip(state, user), fields(user_id = user.0.id))]
async fn home(State(state): State<AppState>, user: SessionUser) -> Action<HomePage> {
    let entries = match repo::list_entries(&state.db).await {
        Ok(entries) => entries,
        Err(e) => {
            error!(error = %e, "list guest book entries failed");
            return Action::error("An unknown error occurred");
        }
    };

    Action::Ok(HomePage {
        user: user.0,
        guest_book: entries,
    })
}

#[instrument(skip(state, user, form), fields(user_id = user.0.id))]
async fn sign(
    State(state): State<AppState>,
    user: SessionUser,
    form: Result<Form<GuestBookForm>, FormRejection>,
) -> Json<GuestBookOutcome> {
    // A body missing either field reads the same as blank fields.
    let Ok(Form(form)) = form else {
        debug!("guest book form did not deserialize");
        return Json(GuestBookOutcome {
            guest_book_error: Some(FIELDS_REQUIRED.into()),
        });
    };
    let Some(form) = form.validate() else {
        return Json(GuestBookOutcome {
            guest_book_error: Some(FIELDS_REQUIRED.into()),
        });
    };

    match repo::add_entry(&state.db, &form.name, &form.email).await {
        Ok(entry) => {
            info!(entry_id = entry.id, "guest book entry added");
            Json(GuestBookOutcome {
                guest_book_error: None,
            })
        }
        Err(e) => {
            // Duplicate email and transport failure read the same to the
            // client; the detail stays in the log.
            warn!(error = %e, "guest book insert failed");
            Json(GuestBookOutcome {
                guest_book_error: Some(ADD_ERROR.into()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::session::SessionKeys;
    use crate::state::AppState;
    use axum::body::Body;
    use axum::extract::FromRef;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn signed_cookie(state: &AppState) -> String {
        let keys = SessionKeys::from_ref(state);
        let token = keys
            .sign(&crate::session::test_user())
            .expect("sign session");
        format!("__session={token}")
    }

    #[tokio::test]
    async fn missing_guest_book_field_reports_fields_required() {
        let state = AppState::fake();
        let cookie = signed_cookie(&state);
        let app = crate::app::build_app(state);
        let req = Request::builder()
            .method("POST")
            .uri("/guestbook")
            .header(header::COOKIE, cookie.as_str())
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("name=bob"))
            .expect("request");
        let res = app.oneshot(req).await.expect("response");
        assert_eq!(res.status(), StatusCode::OK);
        let body = axum::body::to_bytes(res.into_body(), 4096)
            .await
            .expect("body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(json["guestBookError"], "Name and email are required");
    }
}
