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
use std::collections::BTreeMap;

use crate::bucket::{record_bucket, HourBucket};
use crate::classify::{Classifier, Status};
use crate::error::Result;
use crate::record::LogRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityBucket {
    pub name: HourBucket,
    pub commands: usize,
    pub errors: usize,
}

/// Commands and errors per hour of day, sparse, ascending by hour.
pub fn hourly_activity(
    records: &[LogRecord],
    classifier: &Classifier,
) -> Result<Vec<ActivityBucket>> {
    let mut hourly: BTreeMap<HourBucket, (usize, usize)> = BTreeMap::new();

    for record in records {
        let bucket = record_bucket(record)?;
        let (commands, errors) = hourly.entry(bucket).or_default();
        *commands += 1;
        if classifier.status(record.output_text()) == Status::Error {
            *errors += 1;
        }
    }

    Ok(hourly
        .into_iter()
        .map(|(name, (commands, errors))| ActivityBucket {
            name,
            commands,
            errors,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyticsError;
    use crate::record::parse_log;

    #[test]
    fn test_sparse_and_sorted() {
        let records = parse_log(concat!(
            "{\"timestamp\":\"2024-01-02T23:10:00Z\",\"output\":\"ok\"}\n",
            "{\"timestamp\":\"2024-01-01T09:00:00Z\",\"output\":\"Error: gas\"}\n",
            "{\"timestamp\":\"2024-01-03T09:59:00Z\",\"output\":\"ok\"}\n",
        ))
        .unwrap();

        let activity = hourly_activity(&records, &Classifier::default()).unwrap();
        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"name": "09:00", "commands": 2, "errors": 1},
                {"name": "23:00", "commands": 1, "errors": 0},
            ])
        );
    }

    #[test]
    fn test_missing_timestamp_fails_request() {
        let records =
            parse_log("{\"timestamp\":\"2024-01-01T09:00:00Z\"}\n{\"output\":\"ok\"}\n").unwrap();
        let err = hourly_activity(&records, &Classifier::default()).unwrap_err();
        assert!(matches!(err, AnalyticsError::BadRecord { line: 2, .. }));
    }

    #[test]
    fn test_empty_log() {
        assert!(hourly_activity(&[], &Classifier::default()).unwrap().is_empty());
    }
}
