#![allow(dead_code)]

use climate_service::api::{create_router, AppState};
use climate_service::db::{
    create_schema, Measurement, MeasurementRepository, Station, StationRepository,
};
use climate_service::services::ObservationService;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub const WAIKIKI: &str = "USC00519397";
pub const KANEOHE: &str = "USC00513117";
pub const WAIHEE: &str = "USC00519281";
pub const HONOLULU: &str = "USC00511918";

/// Fresh in-memory dataset with the station and measurement tables
///
/// A single connection that never expires, so every query sees the same
/// in-memory database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    create_schema(&pool)
        .await
        .expect("Failed to create dataset schema");

    pool
}

pub fn station(id: i64, code: &str, name: &str) -> Station {
    Station {
        id,
        station: code.to_string(),
        name: name.to_string(),
        latitude: Some(21.2716),
        longitude: Some(-157.8168),
        elevation: Some(3.0),
    }
}

pub fn measurement(
    id: i64,
    station: &str,
    date: &str,
    prcp: Option<f64>,
    tobs: f64,
) -> Measurement {
    Measurement {
        id,
        station: station.to_string(),
        date: date.to_string(),
        prcp,
        tobs,
    }
}

pub async fn insert_stations(pool: &SqlitePool, stations: &[Station]) {
    for s in stations {
        sqlx::query(
            r#"
            INSERT INTO station (id, station, name, latitude, longitude, elevation)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(s.id)
        .bind(&s.station)
        .bind(&s.name)
        .bind(s.latitude)
        .bind(s.longitude)
        .bind(s.elevation)
        .execute(pool)
        .await
        .expect("Failed to insert station");
    }
}

pub async fn insert_measurements(pool: &SqlitePool, measurements: &[Measurement]) {
    let mut tx = pool.begin().await.expect("Failed to begin transaction");

    for m in measurements {
        sqlx::query(
            r#"
            INSERT INTO measurement (id, station, date, prcp, tobs)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(m.id)
        .bind(&m.station)
        .bind(&m.date)
        .bind(m.prcp)
        .bind(m.tobs)
        .execute(&mut *tx)
        .await
        .expect("Failed to insert measurement");
    }

    tx.commit().await.expect("Failed to commit measurements");
}

/// Small Hawaii dataset whose newest observation is 2017-08-23
///
/// - WAIKIKI: 4 readings, all with precipitation
/// - WAIHEE: 2 readings
/// - KANEOHE: 2 readings, one without precipitation
/// - HONOLULU: no readings
pub async fn seed_hawaii_fixture(pool: &SqlitePool) {
    insert_stations(
        pool,
        &[
            station(1, WAIKIKI, "WAIKIKI 717.2, HI US"),
            station(2, KANEOHE, "KANEOHE 838.1, HI US"),
            station(3, WAIHEE, "WAIHEE 837.5, HI US"),
            station(4, HONOLULU, "HONOLULU OBSERVATORY 702.2, HI US"),
        ],
    )
    .await;

    insert_measurements(
        pool,
        &[
            measurement(1, WAIKIKI, "2016-08-22", Some(0.4), 80.0),
            measurement(2, WAIKIKI, "2016-08-23", Some(0.0), 81.0),
            measurement(3, KANEOHE, "2017-01-01", None, 58.0),
            measurement(4, WAIKIKI, "2017-01-10", Some(0.02), 60.0),
            measurement(5, KANEOHE, "2017-01-20", Some(0.1), 62.0),
            measurement(6, WAIHEE, "2017-01-31", Some(0.3), 70.0),
            measurement(7, WAIHEE, "2017-02-01", Some(0.0), 75.0),
            measurement(8, WAIKIKI, "2017-08-23", Some(0.0), 81.0),
        ],
    )
    .await;
}

pub fn observation_service(pool: &SqlitePool) -> ObservationService {
    ObservationService::new(
        MeasurementRepository::new(pool.clone()),
        StationRepository::new(pool.clone()),
    )
}

pub fn test_router(pool: &SqlitePool) -> axum::Router {
    create_router(AppState {
        observation_service: observation_service(pool),
    })
}
