//! SQLite ListRepository implementation.

use sqlx::{Row, SqlitePool};

use crate::db::utils::current_timestamp;
use crate::db::{DbError, DbResult, Id, List, ListRepository};

/// SQLx-backed list repository.
pub struct SqliteListRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> ListRepository for SqliteListRepository<'a> {
    async fn create(&self, list: &List) -> DbResult<List> {
        let now = current_timestamp();

        sqlx::query(
            r#"INSERT INTO list (id, title, board_id, "order", created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&list.id)
        .bind(&list.title)
        .bind(&list.board_id)
        .bind(list.order)
        .bind(&now)
        .bind(&now)
        .execute(self.pool)
        .await?;

        Ok(List {
            created_at: now.clone(),
            updated_at: now,
            ..list.clone()
        })
    }

    async fn get(&self, id: &str) -> DbResult<List> {
        let row = sqlx::query(
            r#"SELECT id, title, board_id, "order", created_at, updated_at FROM list WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.as_ref()
            .map(row_to_list)
            .ok_or_else(|| DbError::not_found("List", id))
    }

    async fn list_by_board(&self, board_id: &str) -> DbResult<Vec<List>> {
        let rows = sqlx::query(
            r#"SELECT id, title, board_id, "order", created_at, updated_at
               FROM list WHERE board_id = ? ORDER BY "order", created_at"#,
        )
        .bind(board_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.iter().map(row_to_list).collect())
    }

    async fn count_by_board(&self, board_id: &str) -> DbResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM list WHERE board_id = ?")
            .bind(board_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    async fn update(&self, list: &List) -> DbResult<()> {
        let result = sqlx::query("UPDATE list SET title = ?, updated_at = ? WHERE id = ?")
            .bind(&list.title)
            .bind(current_timestamp())
            .bind(&list.id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("List", &list.id));
        }
        Ok(())
    }

    async fn reorder(&self, board_id: &str, list_ids: &[Id]) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        for (position, list_id) in list_ids.iter().enumerate() {
            let result = sqlx::query(r#"UPDATE list SET "order" = ? WHERE id = ? AND board_id = ?"#)
                .bind(position as i64)
                .bind(list_id)
                .bind(board_id)
                .execute(&mut *tx)
                .await?;

            if result.rows_affected() == 0 {
                return Err(DbError::not_found("List", list_id));
            }
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        let board_id: String = sqlx::query_scalar("SELECT board_id FROM list WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found("List", id))?;

        sqlx::query("DELETE FROM task WHERE list_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM list WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let remaining: Vec<String> = sqlx::query_scalar(
            r#"SELECT id FROM list WHERE board_id = ? ORDER BY "order", created_at"#,
        )
        .bind(&board_id)
        .fetch_all(&mut *tx)
        .await?;

        for (position, list_id) in remaining.iter().enumerate() {
            sqlx::query(r#"UPDATE list SET "order" = ? WHERE id = ?"#)
                .bind(position as i64)
                .bind(list_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

/// Convert a database row to a List model.
fn row_to_list(row: &sqlx::sqlite::SqliteRow) -> List {
    List {
        id: row.get("id"),
        title: row.get("title"),
        board_id: row.get("board_id"),
        order: row.get("order"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
