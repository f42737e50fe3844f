use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::db::{DateWindow, DbError, MeasurementRepository, StationRepository, TempSummary};
use crate::services::response_shaper;
use crate::utils::{is_date_shaped, newest_date_minus_year, DateFormatError};

#[derive(Debug, thiserror::Error)]
pub enum ObservationError {
    #[error("No measurements recorded in the dataset")]
    NoData,
    #[error("No temperature observations between {start} and {end}")]
    EmptyRange { start: String, end: String },
    #[error("Invalid date '{0}', expected yyyy-mm-dd")]
    InvalidDateParameter(String),
    #[error("Stored measurement date is malformed: {0}")]
    MalformedStoredDate(#[from] DateFormatError),
    #[error(transparent)]
    Db(#[from] DbError),
}

#[derive(Clone)]
pub struct ObservationService {
    measurement_repo: MeasurementRepository,
    station_repo: StationRepository,
}

impl ObservationService {
    pub fn new(measurement_repo: MeasurementRepository, station_repo: StationRepository) -> Self {
        Self {
            measurement_repo,
            station_repo,
        }
    }

    /// Newest observation date paired with the same date a year earlier
    ///
    /// Recomputed on every call so it always tracks the current data.
    #[instrument(skip(self))]
    pub async fn get_newest_date(&self) -> Result<DateWindow, ObservationError> {
        let newest_date = self
            .measurement_repo
            .find_newest_date()
            .await?
            .ok_or(ObservationError::NoData)?;

        let year_ago_date = newest_date_minus_year(&newest_date)?;
        debug!("Date window is {} .. {}", year_ago_date, newest_date);

        Ok(DateWindow {
            newest_date,
            year_ago_date,
        })
    }

    /// Date to precipitation for the last year of data; missing values stay null
    #[instrument(skip(self))]
    pub async fn precipitation_for_last_year(
        &self,
    ) -> Result<Map<String, Value>, ObservationError> {
        let window = self.get_newest_date().await?;
        let rows = self
            .measurement_repo
            .find_precipitation_since(&window.year_ago_date)
            .await?;

        Ok(response_shaper::to_ordered_mapping(
            rows.into_iter().map(|r| (r.date, r.prcp)),
        ))
    }

    /// Station name to precipitation observation count, busiest first
    #[instrument(skip(self))]
    pub async fn station_observation_counts(
        &self,
    ) -> Result<Map<String, Value>, ObservationError> {
        let counts = self.station_repo.count_observations_by_station().await?;

        Ok(response_shaper::to_station_mapping(
            counts.into_iter().map(|c| (c.name, c.observation_count)),
        ))
    }

    /// Date to observed temperature for the last year of data
    #[instrument(skip(self))]
    pub async fn temperature_observations_for_last_year(
        &self,
    ) -> Result<Map<String, Value>, ObservationError> {
        let window = self.get_newest_date().await?;
        let rows = self
            .measurement_repo
            .find_temperatures_since(&window.year_ago_date)
            .await?;

        Ok(response_shaper::to_ordered_mapping(
            rows.into_iter().map(|r| (r.date, r.tobs)),
        ))
    }

    /// Min/avg/max temperature over `[start_date, end_date]`
    ///
    /// Without an end date the range runs to the newest observation. Both
    /// bounds must look like `yyyy-mm-dd`; calendar validity is not checked
    /// since the range is compared as text.
    #[instrument(skip(self))]
    pub async fn temperature_stats(
        &self,
        start_date: &str,
        end_date: Option<&str>,
    ) -> Result<TempSummary, ObservationError> {
        Self::require_date_shape(start_date)?;
        if let Some(end) = end_date {
            Self::require_date_shape(end)?;
        }

        let end_date = match end_date {
            Some(end) => end.to_string(),
            None => self.get_newest_date().await?.newest_date,
        };

        let aggregate = self
            .measurement_repo
            .aggregate_temperatures(start_date, &end_date)
            .await?;

        match (aggregate.min_tobs, aggregate.avg_tobs, aggregate.max_tobs) {
            (Some(min), Some(avg), Some(max)) if aggregate.observation_count > 0 => {
                Ok(response_shaper::to_temp_summary(min, avg, max))
            }
            _ => Err(ObservationError::EmptyRange {
                start: start_date.to_string(),
                end: end_date,
            }),
        }
    }

    fn require_date_shape(value: &str) -> Result<(), ObservationError> {
        if is_date_shaped(value) {
            Ok(())
        } else {
            warn!("Rejecting malformed date parameter '{}'", value);
            Err(ObservationError::InvalidDateParameter(value.to_string()))
        }
    }
}
