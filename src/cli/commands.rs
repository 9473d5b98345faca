//! CLI command implementations.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::appeal::{PolicyConfig, ValidationPolicy};
use crate::http::{ApiServer, HttpConfig};
use crate::observability::Logger;
use crate::store::{AppealStore, LocalBackend, LogDiagnostics};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Name of the record namespace under the data directory.
const APPEALS_DIR: &str = "appeals";

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory (required)
    pub data_dir: String,

    /// HTTP bind settings
    #[serde(flatten)]
    pub http: HttpConfig,

    /// Validation policy knobs
    #[serde(default)]
    pub validation: PolicyConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> CliResult<()> {
        if self.data_dir.is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }

        // Policy knobs must compile; surface the reason at load time.
        ValidationPolicy::from_config(&self.validation)
            .map_err(|e| CliError::config_error(format!("Invalid validation policy: {}", e)))?;

        Ok(())
    }

    /// Get data directory as Path
    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }

    /// Get the record namespace directory
    pub fn appeals_path(&self) -> std::path::PathBuf {
        self.data_path().join(APPEALS_DIR)
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
    }
}

/// Create the appeal data directory layout.
///
/// Does not start the server and writes no records.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;

    if is_initialized(&config) {
        return Err(CliError::already_initialized());
    }

    let appeals_dir = config.appeals_path();
    fs::create_dir_all(&appeals_dir).map_err(|e| {
        CliError::config_error(format!(
            "Failed to create directory {:?}: {}",
            appeals_dir, e
        ))
    })?;

    Logger::info(
        "DATA_DIR_INITIALIZED",
        &[("path", &appeals_dir.display().to_string())],
    );

    Ok(())
}

/// Boot the store and start the HTTP intake server.
pub fn serve(config_path: &Path, port_override: Option<u16>) -> CliResult<()> {
    let config = Config::load(config_path)?;

    if !is_initialized(&config) {
        return Err(CliError::not_initialized());
    }

    let policy = ValidationPolicy::from_config(&config.validation)
        .map_err(|e| CliError::config_error(format!("Invalid validation policy: {}", e)))?;

    let backend = LocalBackend::new(config.appeals_path());
    let store = AppealStore::open(backend, policy, std::sync::Arc::new(LogDiagnostics))
        .map_err(|e| CliError::boot_failed(format!("Store open failed: {}", e)))?;

    let mut http_config = config.http.clone();
    if let Some(port) = port_override {
        http_config.port = port;
    }

    let server = ApiServer::new(store, http_config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Check if the data directory is initialized
fn is_initialized(config: &Config) -> bool {
    config.appeals_path().exists()
}

#[cfg(test)]
mod tests {
    use super::super::errors::CliErrorCode;
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_config(temp_dir: &TempDir) -> std::path::PathBuf {
        let config_path = temp_dir.path().join("appealdesk.json");
        let data_dir = temp_dir.path().join("data");

        let config = json!({
            "data_dir": data_dir.to_string_lossy()
        });

        fs::write(&config_path, config.to_string()).unwrap();
        config_path
    }

    #[test]
    fn test_init_creates_appeals_directory() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir);

        init(&config_path).unwrap();

        assert!(temp_dir.path().join("data").join("appeals").exists());
    }

    #[test]
    fn test_init_refuses_reinit() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir);

        init(&config_path).unwrap();

        let result = init(&config_path);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code(), &CliErrorCode::AlreadyInitialized);
    }

    #[test]
    fn test_serve_requires_init() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir);

        let result = serve(&config_path, None);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code(), &CliErrorCode::NotInitialized);
    }

    #[test]
    fn test_config_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir);

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.http.port, 8000);
        assert_eq!(config.validation.phone_min_digits, 10);
        assert_eq!(config.validation.phone_max_digits, 15);
        assert_eq!(config.validation.name_max_len, 50);
    }

    #[test]
    fn test_config_rejects_empty_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("appealdesk.json");
        fs::write(&config_path, json!({ "data_dir": "" }).to_string()).unwrap();

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_config_rejects_bad_policy() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("appealdesk.json");
        let config = json!({
            "data_dir": temp_dir.path().join("data").to_string_lossy(),
            "validation": { "name_alphabet": "[unclosed" }
        });
        fs::write(&config_path, config.to_string()).unwrap();

        let result = Config::load(&config_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_reads_http_block() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("appealdesk.json");
        let config = json!({
            "data_dir": temp_dir.path().join("data").to_string_lossy(),
            "host": "127.0.0.1",
            "port": 9000
        });
        fs::write(&config_path, config.to_string()).unwrap();

        let loaded = Config::load(&config_path).unwrap();
        assert_eq!(loaded.http.socket_addr(), "127.0.0.1:9000");
    }
}
