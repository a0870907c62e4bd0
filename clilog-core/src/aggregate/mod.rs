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

//! Aggregators
//!
//! Four independent views over the same parsed record set. Each builds its
//! own local maps per call; none keeps state between calls.

pub mod activity;
pub mod errors;
pub mod performance;
pub mod summary;

pub use activity::{hourly_activity, ActivityBucket};
pub use errors::{summarize_errors, CategoryCount, ErrorPoint, ErrorSummary, FrequentError};
pub use performance::{
    analyze_performance, LatencyPoint, PerformanceReport, SlowCommand, SubcommandStats,
};
pub use summary::{summarize, Summary};
