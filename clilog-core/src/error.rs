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

//! Error taxonomy for the analytics engine.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Every way a single analytics request can fail.
///
/// All variants are local to one request; nothing is retried.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The log file does not exist.
    #[error("log source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// The log file exists but could not be read.
    #[error("failed to read log source {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line is not a valid JSON record.
    #[error("invalid JSON on line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    /// A well-formed record lacks a field the current endpoint depends on.
    #[error("bad record on line {line}: {reason}")]
    BadRecord { line: usize, reason: String },
}

impl AnalyticsError {
    pub fn bad_record(line: usize, reason: impl Into<String>) -> Self {
        AnalyticsError::BadRecord {
            line,
            reason: reason.into(),
        }
    }
}
