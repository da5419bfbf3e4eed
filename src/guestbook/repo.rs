use serde::Serialize;
use sqlx::{FromRow, PgPool};

/// Full guest book row. Only the insert path sees the email; listings
/// use `GuestBookListing`.
#[derive(Debug, Clone, FromRow)]
pub struct GuestBookEntry {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Listing projection: never carries the email.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GuestBookListing {
    pub id: i32,
    pub name: String,
}

/// Insert a new entry. The unique email constraint makes a second
/// sign-in from the same address fail here.
pub async fn add_entry(db: &PgPool, name: &str, email: &str) -> Result<GuestBookEntry, sqlx::Error> {
    let entry = sqlx::query_as::<_, GuestBookEntry>(
        r#"
        INSERT INTO "guestBook" (name, email)
        VALUES ($1, $2)
        RETURNING id, name, email
        "#,
    )
    .bind(name)
    .bind(email)
    .fetch_one(db)
    .await?;
    Ok(entry)
}

/// All entries, store-defined order.
pub async fn list_entries(db: &PgPool) -> Result<Vec<GuestBookListing>, sqlx::Error> {
    let rows = sqlx::query_as::<_, GuestBookListing>(
        r#"
        SELECT id, name
        FROM "guestBook"
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}
