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

//! Performance analysis
//!
//! Durations are reported in seconds here, unlike the summary which stays in
//! milliseconds.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::bucket::{record_bucket, HourBucket};
use crate::config::{AnalyticsOptions, SlowCommandFrequency};
use crate::error::Result;
use crate::percentile::{mean, round_to, tail_latency};
use crate::record::LogRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub performance_data: Vec<SubcommandStats>,
    pub timeline_data: Vec<LatencyPoint>,
    pub slow_commands: Vec<SlowCommand>,
}

/// Average latency of one subcommand.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcommandStats {
    pub command: String,
    /// Seconds, 2 dp
    pub avg_time: f64,
    pub calls: usize,
}

/// Latency distribution of one hour bucket, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatencyPoint {
    pub time: HourBucket,
    pub avg_response: f64,
    pub p95: f64,
    pub p99: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlowCommand {
    pub command: String,
    /// e.g. `"12.5s"`
    pub duration: String,
    pub frequency: usize,
}

pub fn analyze_performance(
    records: &[LogRecord],
    options: &AnalyticsOptions,
) -> Result<PerformanceReport> {
    // Subcommands in first-seen order.
    let mut order: Vec<&str> = Vec::new();
    let mut per_subcommand: HashMap<&str, Vec<f64>> = HashMap::new();
    let mut per_hour: BTreeMap<HourBucket, Vec<f64>> = BTreeMap::new();

    for record in records {
        let subcommand = record.subcommand()?;
        let bucket = record_bucket(record)?;
        let secs = record.duration_secs();

        per_subcommand
            .entry(subcommand)
            .or_insert_with(|| {
                order.push(subcommand);
                Vec::new()
            })
            .push(secs);
        per_hour.entry(bucket).or_default().push(secs);
    }

    let performance_data = order
        .into_iter()
        .map(|name| {
            let times = &per_subcommand[name];
            SubcommandStats {
                command: name.to_string(),
                avg_time: round_to(mean(times), 2),
                calls: times.len(),
            }
        })
        .collect();

    let timeline_data = per_hour
        .into_iter()
        .filter_map(|(time, durations)| {
            let tails = tail_latency(&durations)?;
            Some(LatencyPoint {
                time,
                avg_response: round_to(mean(&durations), 2),
                p95: tails.p95,
                p99: tails.p99,
            })
        })
        .collect();

    Ok(PerformanceReport {
        performance_data,
        timeline_data,
        slow_commands: slowest_commands(records, options)?,
    })
}

/// Top records by duration, longest first. Equal durations keep file order.
fn slowest_commands(records: &[LogRecord], options: &AnalyticsOptions) -> Result<Vec<SlowCommand>> {
    let mut ranked: Vec<&LogRecord> = records.iter().collect();
    ranked.sort_by(|a, b| b.duration_ms().total_cmp(&a.duration_ms()));
    ranked.truncate(options.slow_command_limit);

    let occurrences = match options.slow_command_frequency {
        SlowCommandFrequency::Placeholder => None,
        SlowCommandFrequency::Counted => {
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for record in records {
                *counts.entry(record.require_command()?).or_default() += 1;
            }
            Some(counts)
        }
    };

    ranked
        .into_iter()
        .map(|record| {
            let command = record.require_command()?;
            let frequency = occurrences
                .as_ref()
                .and_then(|counts| counts.get(command).copied())
                .unwrap_or(1);
            Ok(SlowCommand {
                command: command.to_string(),
                duration: format!("{:.1}s", round_to(record.duration_secs(), 1)),
                frequency,
            })
        })
        .collect()
}
