use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{info, instrument};

use crate::db::DbError;

/// Open a read-only pool over the climate dataset
///
/// The pool is the one data-access handle for the process: build it once at
/// startup and hand clones to the repositories.
#[instrument]
pub async fn connect_read_only(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::from_str(database_url)?.read_only(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    info!("Opened read-only dataset at {}", database_url);
    Ok(pool)
}

/// Create the station and measurement tables if they are missing
///
/// The service itself never calls this on the dataset it serves (the pool is
/// read-only); it exists for seeding fresh databases and for tests.
#[instrument(skip(pool))]
pub async fn create_schema(pool: &SqlitePool) -> Result<(), DbError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Dataset schema is up to date");
    Ok(())
}
