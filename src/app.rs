use sqlx::SqlitePool;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::db::{MeasurementRepository, StationRepository};
use crate::services::ObservationService;

/// Running HTTP server
///
/// The service has no background work; the server task is the whole
/// application.
pub struct Application {
    pub server_handle: JoinHandle<Result<(), std::io::Error>>,
}

impl Application {
    /// Wire repositories, service and router onto the given pool and spawn the server
    pub async fn build(
        config: Config,
        pool: SqlitePool,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Initializing application components");

        let measurement_repo = MeasurementRepository::new(pool.clone());
        let station_repo = StationRepository::new(pool);
        let observation_service = ObservationService::new(measurement_repo, station_repo);

        let app_state = AppState {
            observation_service,
        };
        let app = create_router(app_state).layer(TraceLayer::new_for_http());

        let addr = config.server_addr();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("Server listening on {}", addr);

        let server_handle = tokio::spawn(async move { axum::serve(listener, app).await });

        Ok(Self { server_handle })
    }

    /// Run until the server stops (which runs indefinitely unless error)
    pub async fn run_until_stopped(self) -> Result<(), Box<dyn std::error::Error>> {
        self.server_handle.await??;
        Ok(())
    }
}
