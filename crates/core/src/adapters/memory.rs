use std::sync::Arc;

use error_stack::{report, ResultExt};
use tokio::sync::RwLock;
use tracing::instrument;

use crate::ports::spreadsheet::{
    CredentialSource, SpreadsheetConnector, SpreadsheetError, SpreadsheetSession,
};

#[derive(Debug, Default)]
struct Worksheet {
    title: String,
    rows: Vec<Vec<String>>,
}

#[derive(Debug, Default)]
struct State {
    worksheets: Vec<Worksheet>,
    connection_attempts: usize,
    reject_credentials: bool,
    failure: Option<SpreadsheetError>,
}

/// A spreadsheet held in process memory.
///
/// Clones share the same sheets, so a test can keep one handle for
/// assertions and give another to the repository as its connector.
#[derive(Debug, Default, Clone)]
pub struct InMemorySpreadsheet {
    state: Arc<RwLock<State>>,
}

impl InMemorySpreadsheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `connect` fail as if the service rejected the key.
    pub async fn reject_credentials(&self) {
        self.state.write().await.reject_credentials = true;
    }

    /// Makes every session call fail with `error`.
    pub async fn fail_with(&self, error: SpreadsheetError) {
        self.state.write().await.failure = Some(error);
    }

    pub async fn connection_attempts(&self) -> usize {
        self.state.read().await.connection_attempts
    }

    pub async fn worksheet_titles(&self) -> Vec<String> {
        self.state
            .read()
            .await
            .worksheets
            .iter()
            .map(|sheet| sheet.title.clone())
            .collect()
    }

    /// Raw rows of a worksheet, `None` if it does not exist.
    pub async fn rows(&self, title: &str) -> Option<Vec<Vec<String>>> {
        self.state
            .read()
            .await
            .worksheets
            .iter()
            .find(|sheet| sheet.title == title)
            .map(|sheet| sheet.rows.clone())
    }

    /// Seeds a worksheet, replacing any with the same title.
    pub async fn insert_worksheet(&self, title: &str, rows: Vec<Vec<String>>) {
        let mut state = self.state.write().await;
        state.worksheets.retain(|sheet| sheet.title != title);
        state.worksheets.push(Worksheet {
            title: title.to_string(),
            rows,
        });
    }

    async fn check_failure(&self) -> error_stack::Result<(), SpreadsheetError> {
        match &self.state.read().await.failure {
            Some(error) => Err(report!(error.clone()).attach_printable("Injected failure")),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl SpreadsheetConnector for InMemorySpreadsheet {
    type Session = InMemorySpreadsheet;

    #[instrument(skip(self))]
    async fn connect(
        &self,
        spreadsheet_id: &str,
        credentials: &CredentialSource,
    ) -> error_stack::Result<InMemorySpreadsheet, SpreadsheetError> {
        let mut state = self.state.write().await;
        state.connection_attempts += 1;

        if state.reject_credentials {
            return Err(report!(SpreadsheetError::InvalidCredentials))
                .attach_printable_lazy(|| format!("{} rejected", credentials.describe()));
        }

        Ok(self.clone())
    }
}

#[async_trait::async_trait]
impl SpreadsheetSession for InMemorySpreadsheet {
    async fn worksheet_exists(&self, title: &str) -> error_stack::Result<bool, SpreadsheetError> {
        self.check_failure().await?;
        Ok(self.rows(title).await.is_some())
    }

    async fn add_worksheet(
        &self,
        title: &str,
        _rows: u32,
        _columns: u32,
    ) -> error_stack::Result<(), SpreadsheetError> {
        self.check_failure().await?;
        let mut state = self.state.write().await;
        if state.worksheets.iter().any(|sheet| sheet.title == title) {
            return Err(report!(SpreadsheetError::FailedToAddWorksheet))
                .attach_printable_lazy(|| format!("A sheet named {} already exists", title));
        }
        state.worksheets.push(Worksheet {
            title: title.to_string(),
            rows: Vec::new(),
        });
        Ok(())
    }

    async fn append_row(
        &self,
        title: &str,
        values: &[String],
    ) -> error_stack::Result<(), SpreadsheetError> {
        self.check_failure().await?;
        let mut state = self.state.write().await;
        let sheet = state
            .worksheets
            .iter_mut()
            .find(|sheet| sheet.title == title)
            .ok_or_else(|| report!(SpreadsheetError::FailedToAppendRow))
            .attach_printable_lazy(|| format!("Unable to parse range: {}", title))?;
        sheet.rows.push(values.to_vec());
        Ok(())
    }

    async fn read_all_values(
        &self,
        title: &str,
    ) -> error_stack::Result<Vec<Vec<String>>, SpreadsheetError> {
        self.check_failure().await?;
        self.rows(title)
            .await
            .ok_or_else(|| report!(SpreadsheetError::FailedToFetchRange))
            .attach_printable_lazy(|| format!("Unable to parse range: {}", title))
    }
}
