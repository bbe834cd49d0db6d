use error_stack::{report, Report};
use tracing::{info, instrument};

use crate::adapters::config::sheets_config::SpreadsheetConfig;
use crate::domain::biodata::{BiodataRecord, RecordTable};
use crate::ports::biodata_repository::{BiodataRepository, BiodataRepositoryError, HealthReport};
use crate::ports::spreadsheet::{SpreadsheetConnector, SpreadsheetError, SpreadsheetSession};

/// Grid size of a freshly created biodata worksheet.
pub const NEW_WORKSHEET_ROWS: u32 = 1000;
pub const NEW_WORKSHEET_COLUMNS: u32 = 20;

/// Stores biodata records as rows of one worksheet.
///
/// Every operation authenticates from scratch and drops its session when it
/// returns; no session outlives the call that created it.
pub struct SheetsBiodataRepository<C> {
    config: SpreadsheetConfig,
    connector: C,
}

impl<C> std::fmt::Debug for SheetsBiodataRepository<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SheetsBiodataRepository {{ config: {:?} }}", self.config)
    }
}

/// Invalid credentials are the operator's problem; everything else is the backend's.
fn classify(report: Report<SpreadsheetError>) -> Report<BiodataRepositoryError> {
    let details = report.current_context().to_string();
    let context = match report.current_context() {
        SpreadsheetError::InvalidCredentials => BiodataRepositoryError::configuration(details),
        _ => BiodataRepositoryError::backend(details),
    };
    report.change_context(context)
}

impl<C: SpreadsheetConnector> SheetsBiodataRepository<C> {
    pub fn new(config: SpreadsheetConfig, connector: C) -> Self {
        Self { config, connector }
    }

    /// Resolves the credential source and opens a session.
    ///
    /// Without inline credentials or a key file this fails with
    /// `ConfigurationError` before the connector is ever called.
    #[instrument]
    pub async fn authenticate(&self) -> error_stack::Result<C::Session, BiodataRepositoryError> {
        let credentials = self.config.credential_source().ok_or_else(|| {
            report!(BiodataRepositoryError::configuration(format!(
                "service account key file '{}' not found and no inline credentials configured",
                self.config.service_account_file.display()
            )))
        })?;

        self.connector
            .connect(&self.config.spreadsheet_id, &credentials)
            .await
            .map_err(classify)
    }
}

#[async_trait::async_trait]
impl<C: SpreadsheetConnector> BiodataRepository for SheetsBiodataRepository<C> {
    #[instrument(skip(record), fields(fields = record.len()))]
    async fn append_record(
        &self,
        record: &BiodataRecord,
    ) -> error_stack::Result<(), BiodataRepositoryError> {
        let session = self.authenticate().await?;
        let title = self.config.worksheet_name.as_str();

        let exists = session.worksheet_exists(title).await.map_err(classify)?;
        if !exists {
            info!("Creating worksheet '{}' with header row", title);
            session
                .add_worksheet(title, NEW_WORKSHEET_ROWS, NEW_WORKSHEET_COLUMNS)
                .await
                .map_err(classify)?;
            session
                .append_row(title, &record.keys())
                .await
                .map_err(classify)?;
        }

        session
            .append_row(title, &record.values())
            .await
            .map_err(classify)?;

        info!("✅ Appended biodata row to '{}'", title);
        Ok(())
    }

    #[instrument]
    async fn read_all_records(&self) -> error_stack::Result<RecordTable, BiodataRepositoryError> {
        let session = self.authenticate().await?;
        let title = self.config.worksheet_name.as_str();

        if !session.worksheet_exists(title).await.map_err(classify)? {
            info!("Worksheet '{}' does not exist yet", title);
            return Ok(RecordTable::empty());
        }

        let values = session.read_all_values(title).await.map_err(classify)?;
        let table = RecordTable::from_values(values);

        info!("Read {} biodata rows from '{}'", table.len(), title);
        Ok(table)
    }

    fn health(&self) -> HealthReport {
        let credentials = self
            .config
            .credential_source()
            .map(|source| source.describe());

        HealthReport {
            status: if credentials.is_some() {
                "ok"
            } else {
                "unconfigured"
            },
            credentials,
            spreadsheet_id: self.config.spreadsheet_id.clone(),
            worksheet: self.config.worksheet_name.clone(),
        }
    }
}
