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

pub mod analytics;
pub mod health;
pub mod logs;

pub use analytics::{get_command_activity, get_error_summary, get_performance, get_summary};
pub use health::health_check;
pub use logs::list_cli_logs;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use clilog_core::{AnalyticsError, LogAnalyzer, LogSource};
use serde::Serialize;
use std::sync::Arc;

/// Message returned for any malformed line, whatever the endpoint.
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid JSON format in log file";

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Bad record: {0}")]
    BadRecord(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InvalidFormat(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRecord(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        match err {
            AnalyticsError::SourceNotFound { path } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                ApiError::NotFound(format!("{name} not found"))
            }
            AnalyticsError::MalformedRecord { line, message } => {
                tracing::warn!(line, "Rejecting log with malformed record: {}", message);
                ApiError::InvalidFormat(INVALID_FORMAT_MESSAGE.to_string())
            }
            err @ AnalyticsError::BadRecord { .. } => {
                tracing::warn!("{}", err);
                ApiError::BadRecord(err.to_string())
            }
            err @ AnalyticsError::Io { .. } => {
                tracing::error!("{}", err);
                ApiError::Internal("failed to read log source".to_string())
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn LogSource>,
    pub analyzer: Arc<LogAnalyzer>,
}

impl AppState {
    pub fn new(source: Arc<dyn LogSource>, analyzer: LogAnalyzer) -> Self {
        Self {
            source,
            analyzer: Arc::new(analyzer),
        }
    }

    /// Run one analysis off the async runtime. Reading and parsing the whole
    /// log is blocking work.
    pub(crate) async fn analyze<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&LogAnalyzer, &dyn LogSource) -> clilog_core::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let source = Arc::clone(&self.source);
        let analyzer = Arc::clone(&self.analyzer);

        tokio::task::spawn_blocking(move || f(analyzer.as_ref(), source.as_ref()))
            .await
            .map_err(|e| {
                tracing::error!("Analysis task failed: {}", e);
                ApiError::Internal("analysis task failed".to_string())
            })?
            .map_err(ApiError::from)
    }
}
