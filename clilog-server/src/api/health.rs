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

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use clilog_core::AnalyticsError;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use super::{ApiError, AppState};

/// Health check response structure
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub log_source: String,
    pub readable: bool,
    /// Non-blank lines in the log, when readable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<usize>,
}

/// GET /api/health - Reports whether the command log can be read
pub async fn health_check(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    debug!("Health check requested");

    let source = Arc::clone(&state.source);
    let log_source = source.describe();
    let read = tokio::task::spawn_blocking(move || source.read_to_string())
        .await
        .map_err(|e| {
            tracing::error!("Health check task failed: {}", e);
            ApiError::Internal("health check failed".to_string())
        })?;

    let lines = match read {
        Ok(text) => Some(text.lines().filter(|l| !l.trim().is_empty()).count()),
        Err(AnalyticsError::SourceNotFound { .. }) => {
            warn!("Log source {} does not exist", log_source);
            None
        }
        Err(e) => {
            warn!("Log source unreadable: {}", e);
            None
        }
    };
    let readable = lines.is_some();

    let health = HealthResponse {
        status: if readable { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        log_source,
        readable,
        lines,
    };

    let status_code = if readable {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    Ok((status_code, Json(health)))
}
