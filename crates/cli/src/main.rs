use staff_biodata_core::adapters::config::app_config::AppConfig;
use staff_biodata_core::adapters::telemetry;
use std::env;
use tracing::{error, info};

mod application_service_factory;
mod cli_adapter;

use application_service_factory::ApplicationServiceFactory;
use cli_adapter::CliAdapter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|report| format!("{:?}", report))?;

    telemetry::setup_tracing(&config.telemetry, "staff_biodata_cli")
        .map_err(|report| format!("{:?}", report))?;
    telemetry::setup_panic_hook();

    let args: Vec<String> = env::args().collect();

    info!("Starting staff biodata CLI");

    let repository = ApplicationServiceFactory::create(&config);
    let cli_adapter = CliAdapter::new(repository);

    let result = cli_adapter.run(args).await;
    telemetry::shutdown();

    match result {
        Ok(_) => {
            info!("CLI execution completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("CLI execution failed: {:?}", e);
            Err(e)
        }
    }
}
