use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use time::OffsetDateTime;

use crate::auth::repo_types::{NewUser, User};

const PG_UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    Duplicate,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Key-based access to the `users` relation.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;
    async fn touch_last_login(&self, user_id: i64, at: OffsetDateTime) -> Result<(), StoreError>;
    /// Returns `false` when no row matched.
    async fn delete(&self, user_id: i64) -> Result<bool, StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, full_name, email, password_hash, role, join_date, last_login
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let res = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (full_name, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING user_id, full_name, email, password_hash, role, join_date, last_login
            "#,
        )
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.role)
        .fetch_one(&self.db)
        .await;

        match res {
            Ok(u) => Ok(u),
            Err(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some(PG_UNIQUE_VIOLATION) =>
            {
                Err(StoreError::Duplicate)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn touch_last_login(&self, user_id: i64, at: OffsetDateTime) -> Result<(), StoreError> {
        sqlx::query("UPDATE users SET last_login = $2 WHERE user_id = $1")
            .bind(user_id)
            .bind(at)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    async fn delete(&self, user_id: i64) -> Result<bool, StoreError> {
        let res = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    // Needs a disposable PostgreSQL reachable through DATABASE_URL.
    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn pg_unique_violation_is_duplicate() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL");
        let db = crate::db::connect(&url).await.expect("connect");
        sqlx::migrate!("./migrations").run(&db).await.expect("migrate");

        let store = PgUserStore::new(db.clone());
        let email = format!(
            "dup-{}@example.com",
            OffsetDateTime::now_utc().unix_timestamp_nanos()
        );
        let new_user = NewUser {
            full_name: "Dup Test".into(),
            email: email.clone(),
            password_hash: "not-a-hash".into(),
            role: "free".into(),
        };

        let first = store.create(new_user.clone()).await.expect("first insert");
        let second = store.create(new_user).await;
        assert!(matches!(second, Err(StoreError::Duplicate)));

        assert!(store.delete(first.user_id).await.expect("cleanup"));
    }
}
