use sqlx::SqlitePool;
use tracing::{debug, instrument};

use crate::db::{DbError, StationObservationCount};

#[derive(Clone)]
pub struct StationRepository {
    pool: SqlitePool,
}

impl StationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Precipitation observation counts per station, busiest first
    ///
    /// Inner join, so stations without measurements are left out. `COUNT(prcp)`
    /// skips rows whose precipitation is NULL. Equal counts fall back to the
    /// station code so the ordering is stable between calls.
    #[instrument(skip(self))]
    pub async fn count_observations_by_station(
        &self,
    ) -> Result<Vec<StationObservationCount>, DbError> {
        debug!("Querying observation counts by station");

        let counts = sqlx::query_as::<_, StationObservationCount>(
            r#"
            SELECT s.name AS name, COUNT(m.prcp) AS observation_count
            FROM measurement m
            INNER JOIN station s ON m.station = s.station
            GROUP BY m.station, s.name
            ORDER BY observation_count DESC, m.station ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!("Found {} stations with measurements", counts.len());
        Ok(counts)
    }
}
