use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// Database entity models (mirror the existing dataset's tables)
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Station {
    pub id: i64,
    pub station: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Measurement {
    pub id: i64,
    pub station: String,
    pub date: String,
    pub prcp: Option<f64>,
    pub tobs: f64,
}

// Query projections
#[derive(Debug, Clone, FromRow)]
pub struct PrecipitationRow {
    pub date: String,
    pub prcp: Option<f64>,
}

#[derive(Debug, Clone, FromRow)]
pub struct TemperatureRow {
    pub date: String,
    pub tobs: f64,
}

#[derive(Debug, Clone, FromRow)]
pub struct StationObservationCount {
    pub name: String,
    pub observation_count: i64,
}

/// Raw MIN/AVG/MAX over a date range; the aggregates are NULL when
/// `observation_count` is zero.
#[derive(Debug, Clone, FromRow)]
pub struct TemperatureAggregate {
    pub min_tobs: Option<f64>,
    pub avg_tobs: Option<f64>,
    pub max_tobs: Option<f64>,
    pub observation_count: i64,
}

// API response DTOs (to avoid circular dependency between services and api modules)

/// Newest observation date and the same date one year earlier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWindow {
    pub newest_date: String,
    pub year_ago_date: String,
}

/// Temperature summary. Extremes are whole degrees, the mean keeps its fraction.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TempSummary {
    #[serde(rename = "TMIN")]
    pub tmin: i64,
    #[serde(rename = "TAVG")]
    pub tavg: f64,
    #[serde(rename = "TMAX")]
    pub tmax: i64,
}
