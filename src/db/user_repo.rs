//! User repository for Farmstead
//!
//! Lookups are exact matches: the username comparison is case-sensitive and
//! login matches both username and password digest in a single query.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    db::{repository::RepositoryResult, DbPool},
    models::{NewUser, User},
};

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user, issuing its identifier
    async fn insert(&self, user: NewUser) -> RepositoryResult<User>;

    /// Find a user by exact username
    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;

    /// Find a user matching both username and password digest
    async fn find_by_credentials(
        &self,
        username: &str,
        password_hash: &str,
    ) -> RepositoryResult<Option<User>>;

    /// Count stored users
    async fn count(&self) -> RepositoryResult<i64>;
}

/// PostgreSQL implementation of UserRepository
pub struct PgUserRepository {
    pool: DbPool,
}

impl PgUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::postgres::PgRow) -> RepositoryResult<User> {
        Ok(User {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            password_hash: row.try_get("password_hash")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, user: NewUser) -> RepositoryResult<User> {
        let record = User {
            id: Uuid::new_v4(),
            username: user.username,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(record.id)
        .bind(&record.username)
        .bind(&record.password_hash)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_credentials(
        &self,
        username: &str,
        password_hash: &str,
    ) -> RepositoryResult<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = $1 AND password_hash = $2
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
