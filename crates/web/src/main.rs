use staff_biodata_core::adapters::config::app_config::AppConfig;
use staff_biodata_core::adapters::telemetry;
use tokio::net::TcpListener;
use tracing::{info, warn};

mod application_service_factory;
mod page;
mod routes;

use application_service_factory::ApplicationServiceFactory;
use routes::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|report| format!("{:?}", report))?;

    telemetry::setup_tracing(&config.telemetry, "staff_biodata_web")
        .map_err(|report| format!("{:?}", report))?;
    telemetry::setup_panic_hook();

    let repository = ApplicationServiceFactory::create(&config);
    let health = repository.health();
    match &health.credentials {
        Some(source) => info!("Using {}", source),
        None => warn!("⚠️ Google Sheets not configured, submissions will fail"),
    }

    let app = routes::router(AppState { repository });

    let listener = TcpListener::bind(&config.server.bind).await?;
    info!("Serving staff biodata form on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    telemetry::shutdown();
    Ok(())
}
