// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use anyhow::Result;
use clilog_core::AnalyticsOptions;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Clilog Server Configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: HttpServerConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub analytics: AnalyticsOptions,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpServerConfig {
    /// HTTP API listen address (e.g., "127.0.0.1:8000")
    #[serde(default = "default_http_addr")]
    pub listen_addr: String,

    /// Enable CORS (all origins, methods and headers)
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,

    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => anyhow::bail!("unknown log format: {other}"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Path to the newline-delimited JSON command log
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

// Default values
fn default_http_addr() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_enable_cors() -> bool {
    true
}

fn default_log_path() -> PathBuf {
    PathBuf::from("cli_logs.jsonl")
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_http_addr(),
            enable_cors: default_enable_cors(),
            log_format: LogFormat::default(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - CLILOG_HTTP_ADDR: HTTP listen address (default: 127.0.0.1:8000)
    /// - CLILOG_ENABLE_CORS: Enable CORS (default: true)
    /// - CLILOG_LOG_FORMAT: `pretty` or `json` (default: pretty)
    /// - CLILOG_LOG_PATH / LOG_PATH: command log file (default: cli_logs.jsonl)
    pub fn merge_with_env(mut self) -> Self {
        if let Ok(addr) = std::env::var("CLILOG_HTTP_ADDR") {
            self.server.listen_addr = addr;
        }

        if let Ok(cors) = std::env::var("CLILOG_ENABLE_CORS") {
            self.server.enable_cors = cors.parse().unwrap_or(true);
        }

        if let Ok(format) = std::env::var("CLILOG_LOG_FORMAT") {
            match format.parse() {
                Ok(format) => self.server.log_format = format,
                Err(e) => tracing::warn!("Ignoring CLILOG_LOG_FORMAT: {}", e),
            }
        }

        if let Ok(path) = std::env::var("CLILOG_LOG_PATH").or_else(|_| std::env::var("LOG_PATH")) {
            self.source.log_path = PathBuf::from(path);
        }

        self
    }

    /// Load configuration with priority: env > file > defaults
    pub fn load(config_file: Option<PathBuf>) -> Result<Self> {
        let config = if let Some(path) = config_file {
            if path.exists() {
                tracing::info!("Loading configuration from file: {:?}", path);
                Self::from_file(&path)?
            } else {
                tracing::warn!("Config file not found: {:?}, using defaults", path);
                Self::default()
            }
        } else {
            Self::default()
        };

        Ok(config.merge_with_env())
    }

    /// Parse listen address as SocketAddr
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(self.server.listen_addr.parse()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.socket_addr()?;

        if self.analytics.slow_command_limit == 0 || self.analytics.frequent_error_limit == 0 {
            anyhow::bail!("analytics limits must be greater than zero");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clilog_core::{CriticalErrorScope, SlowCommandFrequency};
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.server.listen_addr, "127.0.0.1:8000");
        assert!(config.server.enable_cors);
        assert_eq!(config.source.log_path, PathBuf::from("cli_logs.jsonl"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[server]
listen_addr = "0.0.0.0:9000"
log_format = "json"

[source]
log_path = "/var/log/cli_logs.jsonl"

[analytics]
slow_command_frequency = "counted"
critical_error_scope = "all_groups"
critical_error_threshold = 3
"#
        )
        .unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.listen_addr, "0.0.0.0:9000");
        assert!(config.server.enable_cors);
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(config.source.log_path, PathBuf::from("/var/log/cli_logs.jsonl"));
        assert_eq!(config.analytics.slow_command_frequency, SlowCommandFrequency::Counted);
        assert_eq!(config.analytics.critical_error_scope, CriticalErrorScope::AllGroups);
        assert_eq!(config.analytics.critical_error_threshold, 3);
        assert_eq!(config.analytics.frequent_error_limit, 5);
    }

    #[test]
    fn test_merge_with_env() {
        std::env::set_var("CLILOG_HTTP_ADDR", "0.0.0.0:8080");
        std::env::set_var("CLILOG_LOG_PATH", "/tmp/other.jsonl");

        let config = ServerConfig::default().merge_with_env();
        assert_eq!(config.server.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.source.log_path, PathBuf::from("/tmp/other.jsonl"));

        std::env::remove_var("CLILOG_HTTP_ADDR");
        std::env::remove_var("CLILOG_LOG_PATH");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ServerConfig::default();
        config.server.listen_addr = "not-an-address".to_string();
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.analytics.frequent_error_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
