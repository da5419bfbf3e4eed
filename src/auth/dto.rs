use crate::auth::services::is_valid_email;
use crate::session::UserSession;
use serde::{Deserialize, Serialize};

/// Form body for login.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Form body for registration.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Loader payload for the login/register pages.
#[derive(Debug, Serialize)]
pub struct AuthPage {
    pub user: Option<UserSession>,
    pub error: Option<String>,
}

impl LoginForm {
    /// Trim and check the fields; `None` means "Invalid form data"
    /// without ever touching the store.
    pub fn validate(self) -> Option<Self> {
        let email = self.email.trim().to_string();
        if !is_valid_email(&email) || self.password.chars().count() < 6 {
            return None;
        }
        Some(Self {
            email,
            password: self.password,
        })
    }
}

impl RegisterForm {
    pub fn validate(self) -> Option<Self> {
        let email = self.email.trim().to_string();
        let username = self.username.trim().to_string();
        if !is_valid_email(&email) || username.is_empty() || self.password.chars().count() < 6 {
            return None;
        }
        Some(Self {
            email,
            username,
            password: self.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_form_trims_email() {
        let form = LoginForm {
            email: "  a@x.com ".into(),
            password: "secret1".into(),
        };
        let form = form.validate().expect("valid form");
        assert_eq!(form.email, "a@x.com");
    }

    #[test]
    fn login_form_rejects_short_password() {
        let form = LoginForm {
            email: "a@x.com".into(),
            password: "12345".into(),
        };
        assert!(form.validate().is_none());
    }

    #[test]
    fn login_form_rejects_bad_email() {
        let form = LoginForm {
            email: "nope".into(),
            password: "secret1".into(),
        };
        assert!(form.validate().is_none());
    }

    #[test]
    fn password_minimum_counts_characters_not_bytes() {
        // five characters, ten bytes
        let form = LoginForm {
            email: "a@x.com".into(),
            password: "ááááá".into(),
        };
        assert!(form.validate().is_none());

        // six characters, twelve bytes
        let form = LoginForm {
            email: "a@x.com".into(),
            password: "áááááá".into(),
        };
        assert!(form.validate().is_some());
    }

    #[test]
    fn register_form_rejects_blank_username() {
        let form = RegisterForm {
            email: "a@x.com".into(),
            username: "   ".into(),
            password: "secret1".into(),
        };
        assert!(form.validate().is_none());
    }

    #[test]
    fn register_form_accepts_minimum_password() {
        let form = RegisterForm {
            email: "a@x.com".into(),
            username: "alice".into(),
            password: "secret".into(),
        };
        assert!(form.validate().is_some());
    }
}
