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

// clilog-server/src/api/analytics.rs
//
// Dashboard analytics endpoints

use axum::{extract::State, Json};
use clilog_core::{ActivityBucket, ErrorSummary, PerformanceReport, Summary};
use tracing::debug;

use super::{ApiError, AppState};

/// GET /api/analytics/summary
/// Totals, success rate and mean duration (ms)
pub async fn get_summary(State(state): State<AppState>) -> Result<Json<Summary>, ApiError> {
    let summary = state
        .analyze(|analyzer, source| analyzer.summary(source))
        .await?;

    debug!(
        total = summary.total_commands,
        errors = summary.error_count,
        "Computed summary"
    );
    Ok(Json(summary))
}

/// GET /api/command-activity
/// Commands and errors per hour of day
pub async fn get_command_activity(
    State(state): State<AppState>,
) -> Result<Json<Vec<ActivityBucket>>, ApiError> {
    let activity = state
        .analyze(|analyzer, source| analyzer.activity(source))
        .await?;

    debug!(buckets = activity.len(), "Computed hourly activity");
    Ok(Json(activity))
}

/// GET /api/performance
/// Per-subcommand latency, hourly p95/p99 and the slowest commands
pub async fn get_performance(
    State(state): State<AppState>,
) -> Result<Json<PerformanceReport>, ApiError> {
    let report = state
        .analyze(|analyzer, source| analyzer.performance(source))
        .await?;

    debug!(
        subcommands = report.performance_data.len(),
        buckets = report.timeline_data.len(),
        "Computed performance report"
    );
    Ok(Json(report))
}

/// GET /api/errors/summary
/// Error rate, category breakdown and the most frequent error messages
pub async fn get_error_summary(
    State(state): State<AppState>,
) -> Result<Json<ErrorSummary>, ApiError> {
    let summary = state
        .analyze(|analyzer, source| analyzer.error_summary(source))
        .await?;

    debug!(
        total_errors = summary.total_errors,
        critical = summary.critical_errors,
        "Computed error summary"
    );
    Ok(Json(summary))
}
