use crate::db::models::{DbInfo, Message};
use crate::db::DbPool;

pub struct DbService;

impl DbService {
    /// Single parameterized insert; `id` and `created_at` are assigned by
    /// the store. The fields are optional so that the validation-off policy
    /// binds NULL and lets the schema decide.
    pub async fn insert_message(
        pool: &DbPool,
        username: Option<&str>,
        message: Option<&str>,
    ) -> sqlx::Result<()> {
        sqlx::query("INSERT INTO messages (username, message) VALUES (?, ?)")
            .bind(username)
            .bind(message)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Full history, newest first.
    pub async fn list_messages(pool: &DbPool) -> sqlx::Result<Vec<Message>> {
        sqlx::query_as::<_, Message>(
            "SELECT id, username, message, created_at FROM messages ORDER BY id DESC",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn recent_messages(pool: &DbPool, limit: i64) -> sqlx::Result<Vec<Message>> {
        sqlx::query_as::<_, Message>(
            "SELECT id, username, message, created_at FROM messages ORDER BY id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn count_messages(pool: &DbPool) -> sqlx::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(pool)
            .await
    }

    pub async fn db_info(pool: &DbPool) -> sqlx::Result<DbInfo> {
        sqlx::query_as::<_, DbInfo>(
            "SELECT DATABASE() AS `database`, @@hostname AS host, CAST(@@port AS SIGNED) AS port",
        )
        .fetch_one(pool)
        .await
    }
}
