use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error, info, instrument, warn};
use utoipa::{OpenApi, ToSchema};

use crate::db::TempSummary;
use crate::services::{ObservationError, ObservationService};

#[derive(Clone)]
pub struct AppState {
    pub observation_service: ObservationService,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

const WELCOME_PAGE: &str = "Routes for Hawaiian Climate Analysis:<br/>\
<br/>\
/api/v1.0/precipitation<br/>\
--Precipitation Observations: One Year<br/>\
<br/>\
/api/v1.0/stations<br/>\
--Observation Stations<br/>\
<br/>\
/api/v1.0/tobs<br/>\
--Temperature Observations (tobs): Prior Year<br/>\
<br/>\
/api/v1.0/temps/&lt;start&gt;/&lt;end&gt;<br/>\
--Low, Avg, High temp for date or date range (format yyyy-mm-dd)";

#[derive(OpenApi)]
#[openapi(
    paths(
        welcome,
        precipitation,
        stations,
        tobs,
        temps_from,
        temps_between,
    ),
    components(schemas(TempSummary, ErrorResponse)),
    tags(
        (name = "climate", description = "Summaries of historical Hawaii weather observations")
    )
)]
pub struct ApiDoc;

pub fn generate_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/temps/{start}", get(temps_from))
        .route("/api/v1.0/temps/{start}/{end}", get(temps_between))
        .with_state(state)
}

/// Map a service failure onto a status code and JSON error body
fn error_response(err: ObservationError) -> ApiError {
    let status = match &err {
        ObservationError::EmptyRange { .. } => {
            warn!("{}", err);
            StatusCode::NOT_FOUND
        }
        ObservationError::InvalidDateParameter(_) => {
            warn!("{}", err);
            StatusCode::BAD_REQUEST
        }
        ObservationError::NoData
        | ObservationError::MalformedStoredDate(_)
        | ObservationError::Db(_) => {
            error!("{}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

#[utoipa::path(
    get,
    path = "/",
    tag = "climate",
    responses(
        (status = OK, description = "List of available routes", content_type = "text/html", body = String)
    )
)]
#[instrument]
async fn welcome() -> Html<&'static str> {
    debug!("Route listing requested");
    Html(WELCOME_PAGE)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    tag = "climate",
    responses(
        (status = OK, description = "Precipitation by date for the last year of data, null where unrecorded", body = HashMap<String, Option<f64>>),
        (status = INTERNAL_SERVER_ERROR, description = "Dataset is empty or unreadable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
async fn precipitation(
    State(state): State<AppState>,
) -> Result<Json<Map<String, Value>>, ApiError> {
    debug!("Fetching precipitation for the last year");
    let mapping = state
        .observation_service
        .precipitation_for_last_year()
        .await
        .map_err(error_response)?;

    info!("Retrieved precipitation for {} dates", mapping.len());
    Ok(Json(mapping))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    tag = "climate",
    responses(
        (status = OK, description = "Precipitation observation count by station name, busiest first", body = HashMap<String, i64>),
        (status = INTERNAL_SERVER_ERROR, description = "Dataset is unreadable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
async fn stations(State(state): State<AppState>) -> Result<Json<Map<String, Value>>, ApiError> {
    debug!("Fetching observation counts by station");
    let mapping = state
        .observation_service
        .station_observation_counts()
        .await
        .map_err(error_response)?;

    info!("Retrieved observation counts for {} stations", mapping.len());
    Ok(Json(mapping))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    tag = "climate",
    responses(
        (status = OK, description = "Observed temperature by date for the last year of data", body = HashMap<String, f64>),
        (status = INTERNAL_SERVER_ERROR, description = "Dataset is empty or unreadable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
async fn tobs(State(state): State<AppState>) -> Result<Json<Map<String, Value>>, ApiError> {
    debug!("Fetching temperature observations for the last year");
    let mapping = state
        .observation_service
        .temperature_observations_for_last_year()
        .await
        .map_err(error_response)?;

    info!("Retrieved temperature observations for {} dates", mapping.len());
    Ok(Json(mapping))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/temps/{start}",
    tag = "climate",
    params(
        ("start" = String, Path, description = "First date of the range, yyyy-mm-dd"),
    ),
    responses(
        (status = OK, description = "Temperature summary from start through the newest observation", body = TempSummary),
        (status = BAD_REQUEST, description = "Start date is not yyyy-mm-dd", body = ErrorResponse),
        (status = NOT_FOUND, description = "No observations in the range", body = ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Dataset is empty or unreadable", body = ErrorResponse)
    )
)]
#[instrument(skip(state), fields(start = %start))]
async fn temps_from(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> Result<Json<TempSummary>, ApiError> {
    debug!("Fetching temperature summary from {}", start);
    let summary = state
        .observation_service
        .temperature_stats(&start, None)
        .await
        .map_err(error_response)?;

    info!(
        "Temperature summary from {}: min {} avg {:.2} max {}",
        start, summary.tmin, summary.tavg, summary.tmax
    );
    Ok(Json(summary))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/temps/{start}/{end}",
    tag = "climate",
    params(
        ("start" = String, Path, description = "First date of the range, yyyy-mm-dd"),
        ("end" = String, Path, description = "Last date of the range (inclusive), yyyy-mm-dd"),
    ),
    responses(
        (status = OK, description = "Temperature summary for the range", body = TempSummary),
        (status = BAD_REQUEST, description = "A date is not yyyy-mm-dd", body = ErrorResponse),
        (status = NOT_FOUND, description = "No observations in the range", body = ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Dataset is unreadable", body = ErrorResponse)
    )
)]
#[instrument(skip(state), fields(start = %start, end = %end))]
async fn temps_between(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TempSummary>, ApiError> {
    debug!("Fetching temperature summary from {} to {}", start, end);
    let summary = state
        .observation_service
        .temperature_stats(&start, Some(&end))
        .await
        .map_err(error_response)?;

    info!(
        "Temperature summary from {} to {}: min {} avg {:.2} max {}",
        start, end, summary.tmin, summary.tavg, summary.tmax
    );
    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_every_route() {
        let spec = serde_json::to_value(generate_openapi_spec()).unwrap();

        for path in [
            "/",
            "/api/v1.0/precipitation",
            "/api/v1.0/stations",
            "/api/v1.0/tobs",
            "/api/v1.0/temps/{start}",
            "/api/v1.0/temps/{start}/{end}",
        ] {
            assert!(spec["paths"][path]["get"].is_object(), "missing {}", path);
        }
    }

    #[test]
    fn test_openapi_temp_summary_uses_uppercase_keys() {
        let spec = serde_json::to_value(generate_openapi_spec()).unwrap();
        let properties = &spec["components"]["schemas"]["TempSummary"]["properties"];

        assert!(properties["TMIN"].is_object());
        assert!(properties["TAVG"].is_object());
        assert!(properties["TMAX"].is_object());
    }

    #[test]
    fn test_welcome_page_lists_temps_route() {
        assert!(WELCOME_PAGE.contains("/api/v1.0/temps/&lt;start&gt;/&lt;end&gt;"));
    }
}
