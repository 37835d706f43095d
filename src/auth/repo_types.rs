use std::fmt;

use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
#[derive(Clone, FromRow)]
pub struct User {
    pub user_id: i64,
    pub full_name: String,
    pub email: String,
    pub password_hash: String, // Argon2 PHC string, never serialized
    pub role: String,
    pub join_date: OffsetDateTime,
    pub last_login: Option<OffsetDateTime>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Values for a user row about to be inserted.
#[derive(Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}
