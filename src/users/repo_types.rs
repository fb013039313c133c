use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record as stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,                   // assigned by the service on create
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,      // NULL in the store when not set
    pub password: String,           // salted argon2 hash after create
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    // pub deleted_at: Option<OffsetDateTime>,
}
