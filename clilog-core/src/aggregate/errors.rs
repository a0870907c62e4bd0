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

//! Error intelligence
//!
//! Frequent errors are grouped by their exact lowercase output text, not by
//! category, so two differently worded gas failures are two entries that
//! share one pie slice.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::bucket::{record_bucket, HourBucket};
use crate::classify::{Classifier, ErrorCategory};
use crate::config::{AnalyticsOptions, CriticalErrorScope};
use crate::error::Result;
use crate::percentile::round_to;
use crate::record::LogRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorSummary {
    pub total_errors: usize,
    /// Percentage of all records, 1 dp
    pub error_rate: f64,
    pub critical_errors: usize,
    pub pie_data: Vec<CategoryCount>,
    pub timeline_data: Vec<ErrorPoint>,
    pub frequent_errors: Vec<FrequentError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPoint {
    pub time: HourBucket,
    pub errors: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequentError {
    /// Lowercased output text
    pub error: String,
    pub count: usize,
    /// Raw timestamp of the last occurrence in file order
    pub last_seen: String,
    /// Display group of the category
    pub category: String,
    pub suggestion: String,
}

struct MessageGroup<'a> {
    message: String,
    count: usize,
    last_seen: &'a str,
    category: &'a ErrorCategory,
}

pub fn summarize_errors(
    records: &[LogRecord],
    classifier: &Classifier,
    options: &AnalyticsOptions,
) -> Result<ErrorSummary> {
    let mut total_errors = 0usize;
    let mut categories: Vec<(&str, usize)> = Vec::new();
    let mut timeline: BTreeMap<HourBucket, usize> = BTreeMap::new();
    let mut groups: Vec<MessageGroup<'_>> = Vec::new();
    let mut group_index: HashMap<String, usize> = HashMap::new();

    for record in records {
        // Every record must carry a usable timestamp, error or not.
        let bucket = record_bucket(record)?;
        let classification = classifier.classify(record.output_text());
        let Some(category) = classification.category else {
            continue;
        };
        let timestamp = record.require_timestamp()?;

        total_errors += 1;
        *timeline.entry(bucket).or_default() += 1;

        // Slices are keyed by display name alone.
        match categories.iter_mut().find(|(name, _)| *name == category.name()) {
            Some((_, count)) => *count += 1,
            None => categories.push((category.name(), 1)),
        }

        let message = record.output_text().to_lowercase();
        match group_index.get(&message) {
            Some(&idx) => {
                let group = &mut groups[idx];
                group.count += 1;
                group.last_seen = timestamp;
                group.category = category;
            }
            None => {
                group_index.insert(message.clone(), groups.len());
                groups.push(MessageGroup {
                    message,
                    count: 1,
                    last_seen: timestamp,
                    category,
                });
            }
        }
    }

    // Stable: equal counts keep first-encountered order.
    groups.sort_by(|a, b| b.count.cmp(&a.count));

    let threshold = options.critical_error_threshold;
    let critical_errors = match options.critical_error_scope {
        CriticalErrorScope::TopFrequent => groups
            .iter()
            .take(options.frequent_error_limit)
            .filter(|g| g.count >= threshold)
            .count(),
        CriticalErrorScope::AllGroups => groups.iter().filter(|g| g.count >= threshold).count(),
    };

    let frequent_errors = groups
        .into_iter()
        .take(options.frequent_error_limit)
        .map(|g| FrequentError {
            error: g.message,
            count: g.count,
            last_seen: g.last_seen.to_string(),
            category: g.category.group().to_string(),
            suggestion: options.suggestion.clone(),
        })
        .collect();

    let error_rate = if records.is_empty() {
        0.0
    } else {
        round_to(total_errors as f64 / records.len() as f64 * 100.0, 1)
    };

    Ok(ErrorSummary {
        total_errors,
        error_rate,
        critical_errors,
        pie_data: categories
            .into_iter()
            .map(|(name, value)| CategoryCount {
                name: name.to_string(),
                value,
            })
            .collect(),
        timeline_data: timeline
            .into_iter()
            .map(|(time, errors)| ErrorPoint { time, errors })
            .collect(),
        frequent_errors,
    })
}
