use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// There is exactly one logical writer (the UI client), so a single
/// connection doubles as the store's mutex.
pub async fn create_pool(database_url: &str) -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(database_url)
        .await
        .expect("Failed to create database pool")
}
