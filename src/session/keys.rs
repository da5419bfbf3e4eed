use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use crate::auth::User;
use crate::config::SessionConfig;
use crate::state::AppState;

/// What the client gets to hold on to: the user record minus the
/// password hash. Field names are camelCase on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub id: i32,
    pub email: String,
    pub username: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<&User> for UserSession {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    #[serde(rename = "USER-INFO")]
    user: UserSession,
    iat: usize,
    exp: usize,
}

/// Signing and verification keys for the session cookie payload.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::new(&state.config.session)
    }
}

impl SessionKeys {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl: Duration::from_secs((config.ttl_days as u64) * 24 * 60 * 60),
        }
    }

    /// Sign the sanitized session payload for `user`. The password hash
    /// never enters the claims.
    pub fn sign(&self, user: &User) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = SessionClaims {
            user: UserSession::from(user),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = user.id, "session signed");
        Ok(token)
    }

    /// Soft verification: any absent, tampered or expired token is
    /// simply no session.
    pub fn verify(&self, token: &str) -> Option<UserSession> {
        let validation = Validation::default();
        match decode::<SessionClaims>(token, &self.decoding, &validation) {
            Ok(data) => {
                debug!(user_id = data.claims.user.id, "session verified");
                Some(data.claims.user)
            }
            Err(e) => {
                debug!(error = %e, "session rejected");
                None
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn test_user() -> User {
    let now = OffsetDateTime::now_utc();
    User {
        id: 7,
        email: "a@x.com".into(),
        password_hash: "$argon2id$fake".into(),
        username: "alice".into(),
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_user() -> User {
        test_user()
    }

    fn make_keys(secret: &str) -> SessionKeys {
        SessionKeys::new(&SessionConfig {
            secret: secret.into(),
            cookie_secure: false,
            ttl_days: 7,
        })
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let keys = make_keys("dev-secret");
        let user = make_user();
        let token = keys.sign(&user).expect("sign session");
        let session = keys.verify(&token).expect("verify session");
        assert_eq!(session.id, user.id);
        assert_eq!(session.email, user.email);
        assert_eq!(session.username, user.username);
    }

    #[test]
    fn payload_never_contains_password_hash() {
        let user = make_user();
        let now = OffsetDateTime::now_utc().unix_timestamp() as usize;
        let claims = SessionClaims {
            user: UserSession::from(&user),
            iat: now,
            exp: now + 60,
        };
        let json = serde_json::to_string(&claims).expect("serialize claims");
        assert!(json.contains("USER-INFO"));
        assert!(json.contains("createdAt"));
        assert!(!json.contains("passwordHash"));
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2id"));
    }

    #[test]
    fn tampered_token_is_anonymous() {
        let keys = make_keys("dev-secret");
        let mut token = keys.sign(&make_user()).expect("sign session");
        token.push('x');
        assert!(keys.verify(&token).is_none());
    }

    #[test]
    fn wrong_secret_is_anonymous() {
        let signer = make_keys("one-secret");
        let verifier = make_keys("another-secret");
        let token = signer.sign(&make_user()).expect("sign session");
        assert!(verifier.verify(&token).is_none());
    }

    #[test]
    fn expired_token_is_anonymous() {
        let keys = make_keys("dev-secret");
        let now = OffsetDateTime::now_utc().unix_timestamp() as usize;
        let claims = SessionClaims {
            user: UserSession::from(&make_user()),
            iat: now - 600,
            exp: now - 300,
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).expect("encode claims");
        assert!(keys.verify(&token).is_none());
    }

    #[test]
    fn garbage_token_is_anonymous() {
        let keys = make_keys("dev-secret");
        assert!(keys.verify("not-a-token").is_none());
        assert!(keys.verify("").is_none());
    }
}
