use std::path::PathBuf;

use crate::ports::spreadsheet::CredentialSource;

pub const DEFAULT_SERVICE_ACCOUNT_FILE: &str = "service_account_key.json";
pub const DEFAULT_WORKSHEET_NAME: &str = "Staff Biodata";

#[derive(serde::Deserialize, Clone)]
pub struct SpreadsheetConfig {
    pub spreadsheet_id: String,
    #[serde(default = "default_service_account_file")]
    pub service_account_file: PathBuf,
    /// Inline service-account key, either as a table or as a JSON string.
    #[serde(default)]
    pub service_account_credentials: Option<serde_json::Value>,
    #[serde(default = "default_worksheet_name")]
    pub worksheet_name: String,
}

fn default_service_account_file() -> PathBuf {
    PathBuf::from(DEFAULT_SERVICE_ACCOUNT_FILE)
}

fn default_worksheet_name() -> String {
    DEFAULT_WORKSHEET_NAME.to_string()
}

impl SpreadsheetConfig {
    pub fn new(spreadsheet_id: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            service_account_file: default_service_account_file(),
            service_account_credentials: None,
            worksheet_name: default_worksheet_name(),
        }
    }

    /// Resolves where the key comes from without reading or validating it.
    /// Returns `None` when there is no inline key and no file at the configured path.
    pub fn credential_source(&self) -> Option<CredentialSource> {
        match &self.service_account_credentials {
            Some(serde_json::Value::Null) | None => {}
            Some(serde_json::Value::String(raw)) => {
                // Environment variables can only carry the key as a JSON string.
                let value = serde_json::from_str(raw)
                    .unwrap_or_else(|_| serde_json::Value::String(raw.clone()));
                return Some(CredentialSource::Inline(value));
            }
            Some(value) => return Some(CredentialSource::Inline(value.clone())),
        }

        self.service_account_file
            .is_file()
            .then(|| CredentialSource::File(self.service_account_file.clone()))
    }
}

impl std::fmt::Debug for SpreadsheetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpreadsheetConfig")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("service_account_file", &self.service_account_file)
            .field(
                "service_account_credentials",
                &self.service_account_credentials.as_ref().map(|_| "<redacted>"),
            )
            .field("worksheet_name", &self.worksheet_name)
            .finish()
    }
}
