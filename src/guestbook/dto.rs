use serde::{Deserialize, Serialize};

use crate::guestbook::repo::GuestBookListing;
use crate::session::UserSession;

/// Form body for signing the guest book.
#[derive(Debug, Deserialize)]
pub struct GuestBookForm {
    pub name: String,
    pub email: String,
}

impl GuestBookForm {
    /// Trimmed name and email, or `None` when either is missing.
    pub fn validate(self) -> Option<Self> {
        let name = self.name.trim().to_string();
        let email = self.email.trim().to_string();
        if name.is_empty() || email.is_empty() {
            return None;
        }
        Some(Self { name, email })
    }
}

/// Loader payload for the home page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub user: UserSession,
    pub guest_book: Vec<GuestBookListing>,
}

/// Action payload for a guest book submission: empty on success, the
/// generic message otherwise.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestBookOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_book_error: Option<String>,
}
