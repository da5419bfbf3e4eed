use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo_types::User;
use lazy_static::lazy_static;
use regex::Regex;
use sqlx::PgPool;
use tracing::{error, info, warn};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown email and wrong password render the same message so a
    /// caller cannot probe which accounts exist.
    #[error("Invalid email or password")]
    InvalidCredentials,
    /// Duplicate email/username or any other insert failure. The
    /// constraint detail is logged, never surfaced.
    #[error("Error creating user")]
    Creation,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == "23505")
        .unwrap_or(false)
}

/// Hash the password and insert the user row. Returns the full record,
/// password hash included; callers strip it before anything external.
pub async fn create_user(
    db: &PgPool,
    email: &str,
    username: &str,
    password: &str,
) -> Result<User, AuthError> {
    let password_hash = hash_password(password)?;
    match User::create(db, email, username, &password_hash).await {
        Ok(user) => {
            info!(user_id = user.id, email = %user.email, "user created");
            Ok(user)
        }
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %email, username = %username, error = %e, "duplicate user");
            Err(AuthError::Creation)
        }
        Err(e) => {
            error!(error = %e, "create user failed");
            Err(AuthError::Store(e.into()))
        }
    }
}

/// Look up the user by email and check the password against the stored
/// hash. Both an unknown email and a bad password come back as
/// `InvalidCredentials`.
pub async fn login_user(db: &PgPool, email: &str, password: &str) -> Result<User, AuthError> {
    let user = User::find_by_email(db, email).await.map_err(|e| {
        error!(error = %e, "find_by_email failed");
        AuthError::Store(e.into())
    })?;

    let Some(user) = user else {
        warn!(email = %email, "login unknown email");
        return Err(AuthError::InvalidCredentials);
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(email = %email, user_id = user.id, "login invalid password");
        return Err(AuthError::InvalidCredentials);
    }

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(user)
}
