use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid command: {details}")]
    InvalidCommand { details: String },
    #[error("Command execution failed: {details}")]
    ExecutionFailed { details: String },
}

/// Operator actions on the stored submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print every submission as a table.
    ListRecords,
    /// Write the CSV backup to `path`.
    ExportCsv { path: PathBuf },
    /// Report the credential source and target sheet without connecting.
    HealthCheck,
}

/// Runs a [`Command`] and returns the text to show the operator.
#[async_trait::async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, command: Command) -> error_stack::Result<String, CommandError>;
}
