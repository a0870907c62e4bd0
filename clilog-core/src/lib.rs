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

//! Clilog Core
//!
//! Analytics over newline-delimited JSON command logs: parsing,
//! classification, hour bucketing, tail latency and the dashboard
//! aggregates.

pub mod aggregate;
pub mod analyzer;
pub mod bucket;
pub mod classify;
pub mod config;
pub mod error;
pub mod listing;
pub mod percentile;
pub mod record;
pub mod source;

pub use aggregate::{
    ActivityBucket, CategoryCount, ErrorPoint, ErrorSummary, FrequentError, LatencyPoint,
    PerformanceReport, SlowCommand, SubcommandStats, Summary,
};
pub use analyzer::LogAnalyzer;
pub use bucket::HourBucket;
pub use classify::{Classification, Classifier, ErrorCategory, Rule, Status};
pub use config::{AnalyticsOptions, CriticalErrorScope, SlowCommandFrequency};
pub use error::{AnalyticsError, Result};
pub use listing::ListedRecord;
pub use percentile::TailLatency;
pub use record::LogRecord;
pub use source::{FileLogSource, LogSource, StaticLogSource};
