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

//! Hour-of-day bucketing.
//!
//! Every endpoint parses timestamps the same way: a trailing `Z` becomes
//! `+00:00`, then the text is read as ISO-8601 with or without an offset.
//! The bucket is the hour as written, in the timestamp's own offset. Days are
//! not distinguished, so 10:xx on Monday and 10:xx on Tuesday share `10:00`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::{AnalyticsError, Result};
use crate::record::LogRecord;

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Hour-of-day bucket, rendered as `"HH:00"`.
///
/// Ordering follows the hour, which is also the lexicographic order of the
/// rendered keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HourBucket(u8);

impl HourBucket {
    pub fn new(hour: u32) -> Option<Self> {
        (hour < 24).then_some(HourBucket(hour as u8))
    }

    pub fn hour(self) -> u8 {
        self.0
    }
}

impl fmt::Display for HourBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

impl Serialize for HourBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse a log timestamp into the wall-clock time it denotes in its own
/// offset. Returns `None` for text that is not a recognised ISO-8601 form.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    let normalized = match trimmed.strip_suffix(['Z', 'z']) {
        Some(head) => format!("{head}+00:00"),
        None => trimmed.to_string(),
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(ts.naive_local());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(&normalized, fmt) {
            return Some(ts.naive_local());
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(&normalized, fmt) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

pub fn hour_bucket(raw: &str) -> Option<HourBucket> {
    use chrono::Timelike;
    parse_timestamp(raw).and_then(|ts| HourBucket::new(ts.hour()))
}

/// Bucket a record, failing the request if its timestamp is absent or
/// unparseable.
pub fn record_bucket(record: &LogRecord) -> Result<HourBucket> {
    let raw = record.require_timestamp()?;
    hour_bucket(raw).ok_or_else(|| {
        AnalyticsError::bad_record(record.line, format!("unparseable timestamp `{raw}`"))
    })
}
