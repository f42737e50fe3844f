use tracing::{info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use climate_service::app::Application;
use climate_service::config::Config;
use climate_service::db;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with environment filter support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,climate_service=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    info!("Starting climate service with config: {:?}", config);

    // The dataset is served as-is; no migrations run against it
    info!("Connecting to dataset...");
    let pool = db::connect_read_only(&config.database_url, config.db_max_connections).await?;
    info!("Dataset connection established");

    let application = Application::build(config, pool).await?;
    application.run_until_stopped().await
}
