use std::path::PathBuf;

use thiserror::Error;

/// Where the service-account key comes from. Inline credentials win over the file.
#[derive(Clone, PartialEq)]
pub enum CredentialSource {
    Inline(serde_json::Value),
    File(PathBuf),
}

impl CredentialSource {
    pub fn describe(&self) -> String {
        match self {
            CredentialSource::Inline(_) => "inline service account credentials".to_string(),
            CredentialSource::File(path) => format!("service account key file '{}'", path.display()),
        }
    }
}

// Never print key material.
impl std::fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::Inline(_) => write!(f, "Inline(<redacted>)"),
            CredentialSource::File(path) => f.debug_tuple("File").field(path).finish(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpreadsheetError {
    #[error("Invalid service account credentials")]
    InvalidCredentials,
    #[error("Failed to connect to the spreadsheet service")]
    FailedToConnect,
    #[error("Failed to fetch spreadsheet")]
    FailedToFetchSpreadsheet,
    #[error("Failed to add worksheet")]
    FailedToAddWorksheet,
    #[error("Failed to append row")]
    FailedToAppendRow,
    #[error("Failed to fetch range")]
    FailedToFetchRange,
}

/// An authorized session against one spreadsheet. Lives for a single operation.
#[async_trait::async_trait]
pub trait SpreadsheetSession: Send + Sync {
    async fn worksheet_exists(&self, title: &str)
        -> error_stack::Result<bool, SpreadsheetError>;

    async fn add_worksheet(
        &self,
        title: &str,
        rows: u32,
        columns: u32,
    ) -> error_stack::Result<(), SpreadsheetError>;

    /// Appends `values` as a new row after the last non-empty row of the sheet.
    async fn append_row(
        &self,
        title: &str,
        values: &[String],
    ) -> error_stack::Result<(), SpreadsheetError>;

    /// All rows of the sheet as displayed strings. Trailing empty cells may be missing.
    async fn read_all_values(
        &self,
        title: &str,
    ) -> error_stack::Result<Vec<Vec<String>>, SpreadsheetError>;
}

/// Produces sessions. `connect` is the only place network authentication may start.
#[async_trait::async_trait]
pub trait SpreadsheetConnector: Send + Sync {
    type Session: SpreadsheetSession;

    async fn connect(
        &self,
        spreadsheet_id: &str,
        credentials: &CredentialSource,
    ) -> error_stack::Result<Self::Session, SpreadsheetError>;
}
