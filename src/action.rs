use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Outcome of a form action or page loader, dispatched to HTTP by the
/// `IntoResponse` impl below. Redirects are plain data here rather than
/// early-returned responses, so handlers stay a single match away from
/// the service result.
pub enum Action<T> {
    Ok(T),
    Error { message: String },
    Redirect { location: String, set_cookie: Option<String> },
}

impl<T> Action<T> {
    pub fn error(message: impl Into<String>) -> Self {
        Action::Error {
            message: message.into(),
        }
    }

    pub fn redirect(location: impl Into<String>) -> Self {
        Action::Redirect {
            location: location.into(),
            set_cookie: None,
        }
    }

    pub fn redirect_with_cookie(location: impl Into<String>, cookie: String) -> Self {
        Action::Redirect {
            location: location.into(),
            set_cookie: Some(cookie),
        }
    }
}

impl<T: Serialize> IntoResponse for Action<T> {
    fn into_response(self) -> Response {
        match self {
            Action::Ok(data) => Json(data).into_response(),
            Action::Error { message } => {
                Json(serde_json::json!({ "error": message })).into_response()
            }
            Action::Redirect {
                location,
                set_cookie,
            } => {
                let mut headers = HeaderMap::new();
                match HeaderValue::from_str(&location) {
                    Ok(v) => {
                        headers.insert(header::LOCATION, v);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, location = %location, "bad redirect location");
                        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                    }
                }
                if let Some(cookie) = set_cookie {
                    match HeaderValue::from_str(&cookie) {
                        Ok(v) => {
                            headers.insert(header::SET_COOKIE, v);
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "bad session cookie value");
                            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                        }
                    }
                }
                (StatusCode::SEE_OTHER, headers).into_response()
            }
        }
    }
}
