//! SQLite TaskRepository implementation.

use std::str::FromStr;

use sqlx::{Row, SqlitePool};

use crate::db::utils::current_timestamp;
use crate::db::{
    DbError, DbResult, ListSequence, Priority, Task, TaskRepository, TaskStatus,
};

const TASK_COLUMNS: &str = r#"id, title, description, due_date, priority, status, list_id, board_id, "order", created_at, updated_at"#;

/// SQLx-backed task repository.
pub struct SqliteTaskRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> TaskRepository for SqliteTaskRepository<'a> {
    async fn create(&self, task: &Task) -> DbResult<Task> {
        let now = current_timestamp();

        sqlx::query(
            r#"INSERT INTO task (id, title, description, due_date, priority, status, list_id, board_id, "order", created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(&task.due_date)
        .bind(task.priority.to_string())
        .bind(task.status.to_string())
        .bind(&task.list_id)
        .bind(&task.board_id)
        .bind(task.order)
        .bind(&now)
        .bind(&now)
        .execute(self.pool)
        .await?;

        Ok(Task {
            created_at: now.clone(),
            updated_at: now,
            ..task.clone()
        })
    }

    async fn get(&self, id: &str) -> DbResult<Task> {
        let row = sqlx::query(&format!("SELECT {} FROM task WHERE id = ?", TASK_COLUMNS))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.as_ref()
            .map(row_to_task)
            .ok_or_else(|| DbError::not_found("Task", id))
    }

    async fn list_by_list(&self, list_id: &str) -> DbResult<Vec<Task>> {
        let rows = sqlx::query(&format!(
            r#"SELECT {} FROM task WHERE list_id = ? ORDER BY "order", created_at"#,
            TASK_COLUMNS
        ))
        .bind(list_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.iter().map(row_to_task).collect())
    }

    async fn list_by_board(&self, board_id: &str) -> DbResult<Vec<Task>> {
        let rows = sqlx::query(&format!(
            r#"SELECT {} FROM task WHERE board_id = ? ORDER BY list_id, "order", created_at"#,
            TASK_COLUMNS
        ))
        .bind(board_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.iter().map(row_to_task).collect())
    }

    async fn count_by_list(&self, list_id: &str) -> DbResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM task WHERE list_id = ?")
            .bind(list_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    async fn update(&self, task: &Task) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE task
             SET title = ?, description = ?, due_date = ?, priority = ?, status = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(&task.due_date)
        .bind(task.priority.to_string())
        .bind(task.status.to_string())
        .bind(current_timestamp())
        .bind(&task.id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Task", &task.id));
        }
        Ok(())
    }

    async fn persist_sequences(&self, sequences: &[ListSequence]) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        for sequence in sequences {
            for (position, task_id) in sequence.task_ids.iter().enumerate() {
                let result = sqlx::query(
                    r#"UPDATE task SET list_id = ?, "order" = ? WHERE id = ?"#,
                )
                .bind(&sequence.list_id)
                .bind(position as i64)
                .bind(task_id)
                .execute(&mut *tx)
                .await?;

                // Dropping `tx` without commit rolls every earlier write back.
                if result.rows_affected() == 0 {
                    return Err(DbError::not_found("Task", task_id));
                }
            }
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        let list_id: String = sqlx::query_scalar("SELECT list_id FROM task WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found("Task", id))?;

        sqlx::query("DELETE FROM task WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let remaining: Vec<String> = sqlx::query_scalar(
            r#"SELECT id FROM task WHERE list_id = ? ORDER BY "order", created_at"#,
        )
        .bind(&list_id)
        .fetch_all(&mut *tx)
        .await?;

        for (position, task_id) in remaining.iter().enumerate() {
            sqlx::query(r#"UPDATE task SET "order" = ? WHERE id = ?"#)
                .bind(position as i64)
                .bind(task_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

/// Convert a database row to a Task model.
fn row_to_task(row: &sqlx::sqlite::SqliteRow) -> Task {
    Task {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        due_date: row.get("due_date"),
        priority: {
            let priority: String = row.get("priority");
            Priority::from_str(&priority).unwrap_or_default()
        },
        status: {
            let status: String = row.get("status");
            TaskStatus::from_str(&status).unwrap_or_default()
        },
        list_id: row.get("list_id"),
        board_id: row.get("board_id"),
        order: row.get("order"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
