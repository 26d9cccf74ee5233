#[cfg(test)]
mod tests {
    use msgboard::config::DatabaseConfig;
    use msgboard::db::{self, service::DbService, StoreError};

    // Round-trip tests need a real MySQL; they run only when
    // TEST_DATABASE_URL points at a disposable database and skip otherwise.
    async fn test_pool() -> Option<db::DbPool> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        let config = DatabaseConfig {
            url,
            max_connections: 2,
        };
        let pool = db::get_pool(&config).await.expect("connect test database");
        db::init_schema(&pool).await.expect("apply schema");
        Some(pool)
    }

    #[tokio::test]
    async fn missing_url_fails_fast() {
        let config = DatabaseConfig {
            url: String::new(),
            max_connections: 1,
        };

        let err = db::get_pool(&config).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingUrl));
    }

    #[tokio::test]
    async fn message_store_lifecycle() {
        let Some(pool) = test_pool().await else {
            return;
        };

        let before = DbService::list_messages(&pool).await.unwrap();
        let max_id = before.first().map(|m| m.id).unwrap_or(0);

        // 1. Append
        DbService::insert_message(&pool, Some("alice"), Some("hi"))
            .await
            .unwrap();

        // 2. List includes the new row first, with a fresh id
        let after = DbService::list_messages(&pool).await.unwrap();
        assert_eq!(after.len(), before.len() + 1);
        let newest = &after[0];
        assert_eq!(newest.username, "alice");
        assert_eq!(newest.message, "hi");
        assert!(newest.id > max_id);

        // 3. Ordering is strictly descending by id
        DbService::insert_message(&pool, Some("bob"), Some("hello"))
            .await
            .unwrap();
        DbService::insert_message(&pool, Some("carol"), Some("hey"))
            .await
            .unwrap();
        let history = DbService::list_messages(&pool).await.unwrap();
        assert!(history.windows(2).all(|pair| pair[0].id > pair[1].id));

        // 4. Reads are idempotent with no writes in between
        let again = DbService::list_messages(&pool).await.unwrap();
        let ids: Vec<i64> = history.iter().map(|m| m.id).collect();
        let ids_again: Vec<i64> = again.iter().map(|m| m.id).collect();
        assert_eq!(ids, ids_again);

        // 5. Count agrees with the history length
        let count = DbService::count_messages(&pool).await.unwrap();
        assert_eq!(count, history.len() as i64);

        // 6. Debug info reports the connected database
        let info = DbService::db_info(&pool).await.unwrap();
        assert!(info.database.is_some());

        // 7. The limited variant honors its cap, newest first
        let recent = DbService::recent_messages(&pool, 2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, history[0].id);
    }
}
