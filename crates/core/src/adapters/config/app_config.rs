use std::path::PathBuf;

use config::Config;
use error_stack::{report, ResultExt};
use thiserror::Error;

use super::sheets_config::SpreadsheetConfig;

pub const DEFAULT_CONFIG_PATH: &str = "Config";
pub const ENV_PREFIX: &str = "STAFF_BIODATA";

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub sheets: SpreadsheetConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8501".to_string()
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    /// OTLP/gRPC collector, e.g. `http://localhost:4317`. Export is off when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            otlp_endpoint: None,
        }
    }
}

fn default_log_file() -> PathBuf {
    PathBuf::from("staff_biodata.log")
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration sources")]
    Read,
    #[error("Invalid configuration")]
    Invalid,
}

impl AppConfig {
    /// Loads `$CONFIG_PATH` (default `Config`, any format the `config` crate
    /// knows), overridden by `STAFF_BIODATA__SECTION__KEY` environment variables.
    pub fn load() -> error_stack::Result<Self, ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &str) -> error_stack::Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(false),
            )
            .build()
            .change_context(ConfigError::Read)
            .attach_printable_lazy(|| format!("Config file: {}", config_path))?;

        let value = config
            .try_deserialize::<serde_json::Value>()
            .change_context(ConfigError::Read)
            .attach_printable("Config to JSON failed")?;

        Self::from_value(value)
            .attach_printable_lazy(|| format!("Config file: {}", config_path))
    }

    /// Deserializes an already merged configuration tree, naming the field path on failure.
    pub fn from_value(value: serde_json::Value) -> error_stack::Result<Self, ConfigError> {
        serde_path_to_error::deserialize::<_, AppConfig>(value).map_err(|err| {
            let path = err.path().to_string();
            report!(ConfigError::Invalid)
                .attach_printable(err.into_inner().to_string())
                .attach_printable(format!("Field path: {}", path))
                .attach_printable("Make sure all required fields are present in the configuration file.")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_config_gets_defaults() {
        let config = AppConfig::from_value(json!({
            "sheets": { "spreadsheet_id": "abc123" }
        }))
        .unwrap();

        assert_eq!(config.sheets.spreadsheet_id, "abc123");
        assert_eq!(config.sheets.worksheet_name, "Staff Biodata");
        assert_eq!(config.server.bind, "127.0.0.1:8501");
        assert_eq!(config.telemetry.log_file, PathBuf::from("staff_biodata.log"));
        assert_eq!(config.telemetry.otlp_endpoint, None);
    }

    #[test]
    fn test_missing_spreadsheet_id_is_invalid() {
        let report = AppConfig::from_value(json!({ "sheets": {} })).unwrap_err();
        assert!(matches!(report.current_context(), ConfigError::Invalid));
        assert!(format!("{:?}", report).contains("spreadsheet_id"));
    }

    #[test]
    fn test_inline_credentials_table() {
        let config = AppConfig::from_value(json!({
            "sheets": {
                "spreadsheet_id": "abc123",
                "service_account_credentials": {
                    "type": "service_account",
                    "client_email": "svc@example.iam.gserviceaccount.com"
                }
            }
        }))
        .unwrap();

        assert_eq!(
            config.sheets.service_account_credentials.unwrap()["client_email"],
            "svc@example.iam.gserviceaccount.com"
        );
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = std::env::temp_dir().join("staff_biodata_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("Config.toml");
        std::fs::write(
            &path,
            "[sheets]\nspreadsheet_id = \"from-file\"\nworksheet_name = \"Staff\"\n\n[server]\nbind = \"0.0.0.0:9000\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(dir.join("Config").to_str().unwrap()).unwrap();
        assert_eq!(config.sheets.spreadsheet_id, "from-file");
        assert_eq!(config.sheets.worksheet_name, "Staff");
        assert_eq!(config.server.bind, "0.0.0.0:9000");

        std::fs::remove_file(path).unwrap();
    }
}
