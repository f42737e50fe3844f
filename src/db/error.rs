#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Query failed: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Schema migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
