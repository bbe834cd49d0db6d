use serde::Serialize;
use thiserror::Error;

use crate::domain::biodata::{BiodataRecord, RecordTable};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BiodataRepositoryError {
    #[error("Google Sheets is not configured: {details}")]
    ConfigurationError { details: String },
    #[error("Google Sheets request failed: {details}")]
    BackendError { details: String },
}

impl BiodataRepositoryError {
    pub fn configuration<S: Into<String>>(details: S) -> Self {
        BiodataRepositoryError::ConfigurationError {
            details: details.into(),
        }
    }

    pub fn backend<S: Into<String>>(details: S) -> Self {
        BiodataRepositoryError::BackendError {
            details: details.into(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, BiodataRepositoryError::ConfigurationError { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    /// Description of the credential source, `None` when nothing is configured.
    pub credentials: Option<String>,
    pub spreadsheet_id: String,
    pub worksheet: String,
}

#[async_trait::async_trait]
pub trait BiodataRepository: Send + Sync {
    /// Appends the record as a new row, creating the worksheet and its header
    /// row on first use. Duplicate submissions produce duplicate rows.
    async fn append_record(
        &self,
        record: &BiodataRecord,
    ) -> error_stack::Result<(), BiodataRepositoryError>;

    /// Reads every row back, using row 1 as column headers.
    async fn read_all_records(&self) -> error_stack::Result<RecordTable, BiodataRepositoryError>;

    /// Local configuration check. Never touches the network.
    fn health(&self) -> HealthReport;
}
