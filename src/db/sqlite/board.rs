//! SQLite BoardRepository implementation.

use sqlx::{Row, SqlitePool};

use crate::db::utils::current_timestamp;
use crate::db::{Board, BoardRepository, DbError, DbResult, GithubRepo, Id};

/// SQLx-backed board repository.
pub struct SqliteBoardRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> SqliteBoardRepository<'a> {
    async fn member_ids(&self, board_id: &str) -> DbResult<Vec<Id>> {
        let ids = sqlx::query_scalar(
            "SELECT user_id FROM board_member WHERE board_id = ? ORDER BY rowid",
        )
        .bind(board_id)
        .fetch_all(self.pool)
        .await?;
        Ok(ids)
    }
}

impl<'a> BoardRepository for SqliteBoardRepository<'a> {
    async fn create(&self, board: &Board) -> DbResult<Board> {
        let now = current_timestamp();
        let created_at = Some(board.created_at.clone())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| now.clone());

        // Owner is always a member, and always the first one.
        let mut member_ids = vec![board.owner_id.clone()];
        for id in &board.member_ids {
            if !member_ids.contains(id) {
                member_ids.push(id.clone());
            }
        }

        let mut tx = self.pool.begin().await?;

        let github = board.github_repo.as_ref();
        sqlx::query(
            "INSERT INTO board (id, title, owner_id, github_owner, github_name, github_connected, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&board.id)
        .bind(&board.title)
        .bind(&board.owner_id)
        .bind(github.map(|g| g.owner.clone()))
        .bind(github.map(|g| g.name.clone()))
        .bind(github.is_some_and(|g| g.connected))
        .bind(&created_at)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        for user_id in &member_ids {
            sqlx::query("INSERT INTO board_member (board_id, user_id) VALUES (?, ?)")
                .bind(&board.id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(Board {
            member_ids,
            created_at,
            updated_at: now,
            ..board.clone()
        })
    }

    async fn get(&self, id: &str) -> DbResult<Board> {
        let row = sqlx::query(
            "SELECT id, title, owner_id, github_owner, github_name, github_connected, created_at, updated_at
             FROM board WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Board", id))?;

        let member_ids = self.member_ids(id).await?;
        Ok(row_to_board(&row, member_ids))
    }

    async fn list_for_user(&self, user_id: &str) -> DbResult<Vec<Board>> {
        let rows = sqlx::query(
            "SELECT DISTINCT b.id, b.title, b.owner_id, b.github_owner, b.github_name,
                    b.github_connected, b.created_at, b.updated_at
             FROM board b
             LEFT JOIN board_member m ON m.board_id = b.id
             WHERE b.owner_id = ? OR m.user_id = ?
             ORDER BY b.created_at, b.id",
        )
        .bind(user_id)
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        let mut boards = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: String = row.get("id");
            let member_ids = self.member_ids(&id).await?;
            boards.push(row_to_board(row, member_ids));
        }
        Ok(boards)
    }

    async fn update(&self, board: &Board) -> DbResult<()> {
        let github = board.github_repo.as_ref();
        let result = sqlx::query(
            "UPDATE board
             SET title = ?, github_owner = ?, github_name = ?, github_connected = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&board.title)
        .bind(github.map(|g| g.owner.clone()))
        .bind(github.map(|g| g.name.clone()))
        .bind(github.is_some_and(|g| g.connected))
        .bind(current_timestamp())
        .bind(&board.id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Board", &board.id));
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM task WHERE board_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM list WHERE board_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM board_member WHERE board_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM board WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Board", id));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn add_member(&self, board_id: &str, user_id: &str) -> DbResult<()> {
        sqlx::query("INSERT OR IGNORE INTO board_member (board_id, user_id) VALUES (?, ?)")
            .bind(board_id)
            .bind(user_id)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    async fn remove_member(&self, board_id: &str, user_id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM board_member WHERE board_id = ? AND user_id = ?")
            .bind(board_id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Member", user_id));
        }
        Ok(())
    }
}

/// Convert a database row to a Board model.
fn row_to_board(row: &sqlx::sqlite::SqliteRow, member_ids: Vec<Id>) -> Board {
    let owner: Option<String> = row.get("github_owner");
    let name: Option<String> = row.get("github_name");
    let github_repo = match (owner, name) {
        (Some(owner), Some(name)) => Some(GithubRepo {
            owner,
            name,
            connected: row.get("github_connected"),
        }),
        _ => None,
    };

    Board {
        id: row.get("id"),
        title: row.get("title"),
        owner_id: row.get("owner_id"),
        member_ids,
        github_repo,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
