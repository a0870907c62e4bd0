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

//! Per-request entry point.
//!
//! Every method re-reads the source, parses every line and feeds the records
//! to exactly one aggregator. The analyzer itself is immutable and can be
//! shared across threads.

use tracing::debug;

use crate::aggregate::{
    analyze_performance, hourly_activity, summarize, summarize_errors, ActivityBucket,
    ErrorSummary, PerformanceReport, Summary,
};
use crate::classify::Classifier;
use crate::config::AnalyticsOptions;
use crate::error::Result;
use crate::listing::{list_records, ListedRecord};
use crate::record::{parse_log, LogRecord};
use crate::source::LogSource;

#[derive(Debug, Default)]
pub struct LogAnalyzer {
    classifier: Classifier,
    options: AnalyticsOptions,
}

impl LogAnalyzer {
    pub fn new(classifier: Classifier, options: AnalyticsOptions) -> Self {
        Self {
            classifier,
            options,
        }
    }

    /// Default classification rules with the given options.
    pub fn with_options(options: AnalyticsOptions) -> Self {
        Self::new(Classifier::default(), options)
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn options(&self) -> &AnalyticsOptions {
        &self.options
    }

    pub fn load(&self, source: &dyn LogSource) -> Result<Vec<LogRecord>> {
        let text = source.read_to_string()?;
        let records = parse_log(&text)?;
        debug!(source = %source.describe(), records = records.len(), "Loaded log records");
        Ok(records)
    }

    pub fn list(&self, source: &dyn LogSource) -> Result<Vec<ListedRecord>> {
        let records = self.load(source)?;
        Ok(list_records(records, &self.classifier))
    }

    pub fn summary(&self, source: &dyn LogSource) -> Result<Summary> {
        let records = self.load(source)?;
        Ok(summarize(&records, &self.classifier))
    }

    pub fn activity(&self, source: &dyn LogSource) -> Result<Vec<ActivityBucket>> {
        let records = self.load(source)?;
        hourly_activity(&records, &self.classifier)
    }

    pub fn performance(&self, source: &dyn LogSource) -> Result<PerformanceReport> {
        let records = self.load(source)?;
        analyze_performance(&records, &self.options)
    }

    pub fn error_summary(&self, source: &dyn LogSource) -> Result<ErrorSummary> {
        let records = self.load(source)?;
        summarize_errors(&records, &self.classifier, &self.options)
    }
}
