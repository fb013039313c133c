use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::repo_types::User;

/// Wire shape for create and update bodies. The id is optional: create
/// discards it, update requires it.
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub password: String,
}

impl UserPayload {
    pub fn into_user(self) -> User {
        let now = OffsetDateTime::now_utc();
        User {
            id: self.id.unwrap_or(Uuid::nil()),
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            password: self.password,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body returned by DELETE /users/:id.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

/// Uniform error body for every failure response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
