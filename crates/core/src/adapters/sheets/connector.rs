use tracing::instrument;

use crate::ports::spreadsheet::{CredentialSource, SpreadsheetConnector, SpreadsheetError};

use super::{auth, spreadsheet_manager::SpreadsheetManager};

/// Opens a fresh Google Sheets session on every call; nothing is pooled.
#[derive(Debug, Default, Clone, Copy)]
pub struct GoogleSheetsConnector;

#[async_trait::async_trait]
impl SpreadsheetConnector for GoogleSheetsConnector {
    type Session = SpreadsheetManager;

    #[instrument(skip(self))]
    async fn connect(
        &self,
        spreadsheet_id: &str,
        credentials: &CredentialSource,
    ) -> error_stack::Result<SpreadsheetManager, SpreadsheetError> {
        let secret = auth::service_account_key(credentials).await?;
        SpreadsheetManager::new(spreadsheet_id, secret).await
    }
}
