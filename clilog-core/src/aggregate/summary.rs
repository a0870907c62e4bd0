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

use serde::Serialize;

use crate::classify::{Classifier, Status};
use crate::record::LogRecord;

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_commands: usize,
    /// Percentage, unrounded
    pub success_rate: f64,
    /// Mean duration in milliseconds
    pub avg_response_time: f64,
    pub error_count: usize,
}

pub fn summarize(records: &[LogRecord], classifier: &Classifier) -> Summary {
    let total = records.len();
    let mut errors = 0usize;
    let mut total_duration_ms = 0.0;

    for record in records {
        total_duration_ms += record.duration_ms();
        if classifier.status(record.output_text()) == Status::Error {
            errors += 1;
        }
    }

    let (success_rate, avg_response_time) = if total > 0 {
        (
            (total - errors) as f64 / total as f64 * 100.0,
            total_duration_ms / total as f64,
        )
    } else {
        (0.0, 0.0)
    };

    Summary {
        total_commands: total,
        success_rate,
        avg_response_time,
        error_count: errors,
    }
}
