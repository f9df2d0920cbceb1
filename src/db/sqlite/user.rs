//! SQLite UserRepository implementation.

use sqlx::{Row, SqlitePool};

use crate::db::utils::current_timestamp;
use crate::db::{DbError, DbResult, Id, User, UserRepository, UserSummary};

/// SQLx-backed user repository.
pub struct SqliteUserRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> UserRepository for SqliteUserRepository<'a> {
    async fn create(&self, user: &User) -> DbResult<User> {
        let taken: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM user WHERE email = ?)")
            .bind(&user.email)
            .fetch_one(self.pool)
            .await?;

        if taken {
            return Err(DbError::AlreadyExists {
                entity_type: "User".to_string(),
                id: user.email.clone(),
            });
        }

        let created_at = Some(user.created_at.clone())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(current_timestamp);

        sqlx::query(
            "INSERT INTO user (id, name, email, password_hash, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&created_at)
        .execute(self.pool)
        .await?;

        Ok(User {
            created_at,
            ..user.clone()
        })
    }

    async fn get(&self, id: &str) -> DbResult<User> {
        let row = sqlx::query(
            "SELECT id, name, email, password_hash, created_at FROM user WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.as_ref()
            .map(row_to_user)
            .ok_or_else(|| DbError::not_found("User", id))
    }

    async fn get_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, name, email, password_hash, created_at FROM user WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.as_ref().map(row_to_user))
    }

    async fn summaries(&self, ids: &[Id]) -> DbResult<Vec<UserSummary>> {
        let mut summaries = Vec::with_capacity(ids.len());
        for id in ids {
            let row = sqlx::query("SELECT id, name, email FROM user WHERE id = ?")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

            if let Some(row) = row {
                summaries.push(UserSummary {
                    id: row.get("id"),
                    name: row.get("name"),
                    email: row.get("email"),
                });
            }
        }
        Ok(summaries)
    }

    async fn create_session(&self, user_id: &str, token_hash: &str) -> DbResult<()> {
        sqlx::query("INSERT INTO session (token_hash, user_id, created_at) VALUES (?, ?, ?)")
            .bind(token_hash)
            .bind(user_id)
            .bind(current_timestamp())
            .execute(self.pool)
            .await?;
        Ok(())
    }

    async fn find_by_session(&self, token_hash: &str) -> DbResult<Option<User>> {
        let row = sqlx::query(
            "SELECT u.id, u.name, u.email, u.password_hash, u.created_at
             FROM session s JOIN user u ON u.id = s.user_id
             WHERE s.token_hash = ?",
        )
        .bind(token_hash)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.as_ref().map(row_to_user))
    }
}

/// Convert a database row to a User model.
fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> User {
    User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
    }
}
