use axum::http::{header, HeaderMap};
use cookie::{Cookie, SameSite};
use time::Duration;

use crate::config::SessionConfig;

/// Cookie the signed session payload rides in.
pub const SESSION_COOKIE: &str = "__session";

fn base_cookie(value: String, config: &SessionConfig) -> cookie::CookieBuilder<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .secure(config.cookie_secure)
}

/// Build the `Set-Cookie` value carrying a freshly signed token.
/// With `remember` the cookie persists for the configured expiry;
/// without it the cookie is scoped to the browser session.
pub fn session_cookie(token: String, remember: bool, config: &SessionConfig) -> Cookie<'static> {
    let builder = base_cookie(token, config);
    if remember {
        builder.max_age(Duration::days(config.ttl_days)).build()
    } else {
        builder.build()
    }
}

/// An emptied, immediately expiring cookie. Sending it back is the only
/// way to clear the client's copy.
pub fn destroy_cookie(config: &SessionConfig) -> Cookie<'static> {
    base_cookie(String::new(), config)
        .max_age(Duration::ZERO)
        .build()
}

/// Pull the raw session token out of the request's Cookie header, if
/// one is there at all.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    for parsed in Cookie::split_parse(raw) {
        if let Ok(c) = parsed {
            if c.name() == SESSION_COOKIE && !c.value().is_empty() {
                return Some(c.value().to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn config(secure: bool) -> SessionConfig {
        SessionConfig {
            secret: "test-secret".into(),
            cookie_secure: secure,
            ttl_days: 7,
        }
    }

    #[test]
    fn remembered_cookie_has_required_attributes() {
        let rendered = session_cookie("tok".into(), true, &config(false)).to_string();
        assert!(rendered.starts_with("__session=tok"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("SameSite=Lax"));
        assert!(rendered.contains("Path=/"));
        assert!(rendered.contains("Max-Age=604800"));
        assert!(!rendered.contains("Secure"));
    }

    #[test]
    fn session_scoped_cookie_has_no_max_age() {
        let rendered = session_cookie("tok".into(), false, &config(false)).to_string();
        assert!(!rendered.contains("Max-Age"));
    }

    #[test]
    fn production_cookie_is_secure() {
        let rendered = session_cookie("tok".into(), true, &config(true)).to_string();
        assert!(rendered.contains("Secure"));
    }

    #[test]
    fn destroy_cookie_empties_value_and_expires() {
        let rendered = destroy_cookie(&config(false)).to_string();
        assert!(rendered.starts_with("__session=;"));
        assert!(rendered.contains("Max-Age=0"));
    }

    #[test]
    fn token_extracted_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; __session=abc.def.ghi; lang=en"),
        );
        assert_eq!(token_from_headers(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn absent_or_emptied_cookie_yields_nothing() {
        let headers = HeaderMap::new();
        assert!(token_from_headers(&headers).is_none());

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("__session="));
        assert!(token_from_headers(&headers).is_none());
    }
}
