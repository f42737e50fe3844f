use sqlx::SqlitePool;
use tracing::{debug, instrument};

use crate::db::{DbError, PrecipitationRow, TemperatureAggregate, TemperatureRow};

/// Read queries over the `measurement` table
///
/// Dates are `yyyy-mm-dd` text; every range filter and ordering here is a
/// plain string comparison, which matches chronological order only because
/// the format is fixed-width and zero-padded.
#[derive(Clone)]
pub struct MeasurementRepository {
    pool: SqlitePool,
}

impl MeasurementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Most recent observation date, or `None` when the table is empty
    #[instrument(skip(self))]
    pub async fn find_newest_date(&self) -> Result<Option<String>, DbError> {
        debug!("Querying newest measurement date");

        let newest: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
            .fetch_one(&self.pool)
            .await?;

        if let Some(ref date) = newest {
            debug!("Newest measurement date is {}", date);
        } else {
            debug!("No measurements found in database");
        }

        Ok(newest)
    }

    /// Precipitation on or after `since`, ascending by date
    #[instrument(skip(self))]
    pub async fn find_precipitation_since(
        &self,
        since: &str,
    ) -> Result<Vec<PrecipitationRow>, DbError> {
        debug!("Querying precipitation since {}", since);

        let rows = sqlx::query_as::<_, PrecipitationRow>(
            r#"
            SELECT date, CAST(prcp AS REAL) AS prcp
            FROM measurement
            WHERE date >= ?1
            ORDER BY date ASC
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        debug!("Found {} precipitation rows", rows.len());
        Ok(rows)
    }

    /// Temperature observations on or after `since`, ascending by date
    #[instrument(skip(self))]
    pub async fn find_temperatures_since(
        &self,
        since: &str,
    ) -> Result<Vec<TemperatureRow>, DbError> {
        debug!("Querying temperature observations since {}", since);

        let rows = sqlx::query_as::<_, TemperatureRow>(
            r#"
            SELECT date, CAST(tobs AS REAL) AS tobs
            FROM measurement
            WHERE date >= ?1
            ORDER BY date ASC
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        debug!("Found {} temperature rows", rows.len());
        Ok(rows)
    }

    /// MIN/AVG/MAX temperature for `start <= date <= end`, both ends inclusive
    #[instrument(skip(self))]
    pub async fn aggregate_temperatures(
        &self,
        start: &str,
        end: &str,
    ) -> Result<TemperatureAggregate, DbError> {
        debug!("Aggregating temperatures from {} to {}", start, end);

        let aggregate = sqlx::query_as::<_, TemperatureAggregate>(
            r#"
            SELECT CAST(MIN(tobs) AS REAL) AS min_tobs,
                   CAST(AVG(tobs) AS REAL) AS avg_tobs,
                   CAST(MAX(tobs) AS REAL) AS max_tobs,
                   COUNT(tobs) AS observation_count
            FROM measurement
            WHERE date >= ?1 AND date <= ?2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        debug!(
            "Aggregated {} temperature observations",
            aggregate.observation_count
        );
        Ok(aggregate)
    }
}
