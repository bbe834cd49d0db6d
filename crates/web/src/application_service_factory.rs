use std::sync::Arc;

use staff_biodata_core::adapters::config::app_config::AppConfig;
use staff_biodata_core::adapters::sheets::connector::GoogleSheetsConnector;
use staff_biodata_core::application::biodata_service::SheetsBiodataRepository;
use staff_biodata_core::ports::biodata_repository::BiodataRepository;

pub struct ApplicationServiceFactory;

impl ApplicationServiceFactory {
    pub fn create(config: &AppConfig) -> Arc<dyn BiodataRepository> {
        Arc::new(SheetsBiodataRepository::new(
            config.sheets.clone(),
            GoogleSheetsConnector,
        ))
    }
}
