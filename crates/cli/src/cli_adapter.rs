use std::path::PathBuf;
use std::sync::Arc;

use error_stack::{report, ResultExt};
use staff_biodata_core::domain::biodata::csv_export::{to_csv, CSV_FILE_NAME};
use staff_biodata_core::domain::biodata::RecordTable;
use staff_biodata_core::ports::biodata_repository::BiodataRepository;
use staff_biodata_core::ports::command_handler::{Command, CommandError, CommandHandler};
use tracing::{error, info, instrument};

const USAGE: &str = "usage: staff-biodata-cli [list | export [PATH] | health]";

pub struct CliAdapter {
    repository: Arc<dyn BiodataRepository>,
}

impl std::fmt::Debug for CliAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliAdapter")
            .field("repository", &"<BiodataRepository>")
            .finish()
    }
}

fn execution_failed<S: Into<String>>(details: S) -> CommandError {
    CommandError::ExecutionFailed {
        details: details.into(),
    }
}

/// Lays the table out as aligned text columns.
pub fn render_table(table: &RecordTable) -> String {
    let mut widths: Vec<usize> = table
        .headers()
        .iter()
        .map(|header| header.chars().count())
        .collect();
    for row in table.rows() {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut output = line(table.headers());
    output.push('\n');
    output.push_str(
        &widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in table.rows() {
        output.push('\n');
        output.push_str(&line(row.as_slice()));
    }
    output
}

impl CliAdapter {
    pub fn new(repository: Arc<dyn BiodataRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(args))]
    pub async fn run(&self, args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
        let command = self.parse_args(args)?;

        match self.handle(command).await {
            Ok(result) => {
                info!("{}", result);
                Ok(())
            }
            Err(report) => {
                error!("Command failed: {:?}", report);
                Err(format!("Command failed: {}", report.current_context()).into())
            }
        }
    }

    pub fn parse_args(&self, args: Vec<String>) -> Result<Command, CommandError> {
        let invalid = |details: String| CommandError::InvalidCommand { details };

        match args.get(1).map(|s| s.as_str()) {
            None | Some("list") => Ok(Command::ListRecords),
            Some("export") => {
                if args.len() > 3 {
                    return Err(invalid(format!("export takes at most one path\n{}", USAGE)));
                }
                let path = args
                    .get(2)
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(CSV_FILE_NAME));
                Ok(Command::ExportCsv { path })
            }
            Some("health") => Ok(Command::HealthCheck),
            Some(other) => Err(invalid(format!("unknown command '{}'\n{}", other, USAGE))),
        }
    }

    async fn read_table(&self) -> error_stack::Result<RecordTable, CommandError> {
        self.repository.read_all_records().await.map_err(|report| {
            let details = report.current_context().to_string();
            report.change_context(execution_failed(details))
        })
    }
}

#[async_trait::async_trait]
impl CommandHandler for CliAdapter {
    #[instrument]
    async fn handle(&self, command: Command) -> error_stack::Result<String, CommandError> {
        match command {
            Command::ListRecords => {
                let table = self.read_table().await?;
                if table.is_empty() {
                    return Ok("No data available or Google Sheets not configured.".to_string());
                }
                Ok(format!(
                    "\n{}\n\n{} submission(s)",
                    render_table(&table),
                    table.len()
                ))
            }
            Command::ExportCsv { path } => {
                let table = self.read_table().await?;
                if table.is_empty() {
                    return Err(report!(execution_failed("No data available to export")));
                }

                let bytes = to_csv(&table)
                    .change_context_lazy(|| execution_failed("Failed to encode CSV"))?;

                tokio::fs::write(&path, bytes)
                    .await
                    .change_context_lazy(|| {
                        execution_failed(format!("Failed to write {}", path.display()))
                    })?;

                Ok(format!(
                    "✅ Exported {} submission(s) to {}",
                    table.len(),
                    path.display()
                ))
            }
            Command::HealthCheck => {
                let health = self.repository.health();
                serde_json::to_string_pretty(&health)
                    .change_context_lazy(|| execution_failed("Failed to serialize health report"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use staff_biodata_core::adapters::config::sheets_config::SpreadsheetConfig;
    use staff_biodata_core::adapters::memory::InMemorySpreadsheet;
    use staff_biodata_core::application::biodata_service::SheetsBiodataRepository;
    use staff_biodata_core::domain::biodata::{BiodataSubmission, Gender};

    fn adapter(spreadsheet: &InMemorySpreadsheet) -> CliAdapter {
        let config = SpreadsheetConfig {
            service_account_file: "/nonexistent/service_account_key.json".into(),
            service_account_credentials: Some(serde_json::json!({ "type": "service_account" })),
            ..SpreadsheetConfig::new("test-spreadsheet")
        };
        CliAdapter::new(Arc::new(SheetsBiodataRepository::new(
            config,
            spreadsheet.clone(),
        )))
    }

    fn args(values: &[&str]) -> Vec<String> {
        std::iter::once("staff-biodata-cli")
            .chain(values.iter().copied())
            .map(str::to_string)
            .collect()
    }

    async fn seed(adapter: &CliAdapter) {
        let record = BiodataSubmission {
            full_name: "Jane Doe".to_string(),
            phone: "555-1111".to_string(),
            email: "jane@edurepublic.example".to_string(),
            address: String::new(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            gender: Gender::Female,
            department: "Mathematics".to_string(),
            date_joined: NaiveDate::from_ymd_opt(2020, 9, 1).unwrap(),
            emergency_name: String::new(),
            emergency_phone: String::new(),
            emergency_relation: String::new(),
        }
        .into_record(
            NaiveDate::from_ymd_opt(2024, 3, 4)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        );
        adapter.repository.append_record(&record).await.unwrap();
    }

    #[test]
    fn test_parse_args() {
        let adapter = adapter(&InMemorySpreadsheet::new());

        assert_eq!(adapter.parse_args(args(&[])).unwrap(), Command::ListRecords);
        assert_eq!(adapter.parse_args(args(&["list"])).unwrap(), Command::ListRecords);
        assert_eq!(adapter.parse_args(args(&["health"])).unwrap(), Command::HealthCheck);
        assert_eq!(
            adapter.parse_args(args(&["export"])).unwrap(),
            Command::ExportCsv {
                path: PathBuf::from("staff_biodata_backup.csv")
            }
        );
        assert_eq!(
            adapter.parse_args(args(&["export", "/tmp/out.csv"])).unwrap(),
            Command::ExportCsv {
                path: PathBuf::from("/tmp/out.csv")
            }
        );
        assert!(matches!(
            adapter.parse_args(args(&["export", "a.csv", "b.csv"])),
            Err(CommandError::InvalidCommand { .. })
        ));
        assert!(matches!(
            adapter.parse_args(args(&["delete"])),
            Err(CommandError::InvalidCommand { .. })
        ));
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let table = RecordTable::from_values(vec![
            vec!["Name".to_string(), "Phone".to_string()],
            vec!["Jane Doe".to_string(), "555".to_string()],
        ]);

        assert_eq!(
            render_table(&table),
            "Name     | Phone\n---------+------\nJane Doe | 555"
        );
    }

    #[tokio::test]
    async fn test_list_empty() {
        let output = adapter(&InMemorySpreadsheet::new())
            .handle(Command::ListRecords)
            .await
            .unwrap();
        assert_eq!(output, "No data available or Google Sheets not configured.");
    }

    #[tokio::test]
    async fn test_list_records() {
        let adapter = adapter(&InMemorySpreadsheet::new());
        seed(&adapter).await;

        let output = adapter.handle(Command::ListRecords).await.unwrap();
        assert!(output.contains("Full Name"));
        assert!(output.contains("Jane Doe"));
        assert!(output.ends_with("1 submission(s)"));
    }

    #[tokio::test]
    async fn test_export_refuses_empty_table() {
        let path = std::env::temp_dir().join("staff_biodata_cli_empty_export.csv");
        let report = adapter(&InMemorySpreadsheet::new())
            .handle(Command::ExportCsv { path: path.clone() })
            .await
            .unwrap_err();

        assert!(matches!(
            report.current_context(),
            CommandError::ExecutionFailed { .. }
        ));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_export_writes_csv() {
        let adapter = adapter(&InMemorySpreadsheet::new());
        seed(&adapter).await;
        let path = std::env::temp_dir().join("staff_biodata_cli_export.csv");

        adapter
            .handle(Command::ExportCsv { path: path.clone() })
            .await
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Full Name,Phone Number"));
        assert!(lines[1].starts_with("Jane Doe,555-1111"));
    }

    #[tokio::test]
    async fn test_health_check() {
        let output = adapter(&InMemorySpreadsheet::new())
            .handle(Command::HealthCheck)
            .await
            .unwrap();
        assert!(output.contains("\"status\": \"ok\""));
        assert!(output.contains("\"worksheet\": \"Staff Biodata\""));
    }
}
