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

//! Raw log listing: every record, in file order, with its derived status.

use serde::Serialize;

use crate::classify::{Classifier, Status};
use crate::record::LogRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListedRecord {
    #[serde(flatten)]
    pub record: LogRecord,
    pub status: Status,
}

pub fn list_records(records: Vec<LogRecord>, classifier: &Classifier) -> Vec<ListedRecord> {
    records
        .into_iter()
        .map(|record| {
            let status = classifier.status(record.output_text());
            ListedRecord { record, status }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse_log;
    use serde_json::json;

    #[test]
    fn test_status_attached_in_file_order() {
        let records = parse_log(concat!(
            "{\"id\":1,\"command\":\"cli a\",\"output\":\"ok\",\"duration_ms\":5}\n",
            "{\"id\":2,\"command\":\"cli b\",\"output\":\"Error: nope\",\"status\":\"success\"}\n",
            "{\"id\":3}\n",
        ))
        .unwrap();

        let listed = list_records(records, &Classifier::default());
        let json = serde_json::to_value(&listed).unwrap();
        assert_eq!(
            json,
            json!([
                {"id": 1, "command": "cli a", "output": "ok", "duration_ms": 5, "status": "success"},
                {"id": 2, "command": "cli b", "output": "Error: nope", "status": "error"},
                {"id": 3, "status": "success"},
            ])
        );
    }
}
