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

//! Record Parser
//!
//! Turns the newline-delimited JSON log into [`LogRecord`]s. Parsing is
//! fail-fast: the first malformed line aborts the whole request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{AnalyticsError, Result};

/// Subcommand reported when a command has no second token.
pub const UNKNOWN_SUBCOMMAND: &str = "unknown";

/// One command execution, as written by the CLI log writer.
///
/// Fields the writer may omit are optional here; endpoints that depend on
/// them ask for them explicitly via the `require_*` accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Kept as a JSON number so integers are echoed back unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<Number>,

    /// Any additional fields the writer attached (`id`, `user`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    /// 1-based physical line number in the log file.
    #[serde(skip)]
    pub line: usize,
}

impl LogRecord {
    /// Output text, empty when absent.
    pub fn output_text(&self) -> &str {
        self.output.as_deref().unwrap_or("")
    }

    /// Duration in milliseconds, `0` when absent.
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
            .as_ref()
            .and_then(Number::as_f64)
            .unwrap_or(0.0)
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_ms() / 1000.0
    }

    pub fn require_timestamp(&self) -> Result<&str> {
        self.timestamp.as_deref().ok_or_else(|| {
            AnalyticsError::bad_record(self.line, "missing required field `timestamp`")
        })
    }

    pub fn require_command(&self) -> Result<&str> {
        self.command.as_deref().ok_or_else(|| {
            AnalyticsError::bad_record(self.line, "missing required field `command`")
        })
    }

    /// The subcommand this record ran (see [`subcommand_of`]).
    pub fn subcommand(&self) -> Result<&str> {
        self.require_command().map(subcommand_of)
    }
}

/// Second whitespace-delimited token of a command line, i.e. the token after
/// the program name.
pub fn subcommand_of(command: &str) -> &str {
    command
        .split_whitespace()
        .nth(1)
        .unwrap_or(UNKNOWN_SUBCOMMAND)
}

/// Parse a single log line.
pub fn parse_line(line: usize, text: &str) -> Result<LogRecord> {
    let mut record: LogRecord =
        serde_json::from_str(text).map_err(|e| AnalyticsError::MalformedRecord {
            line,
            message: e.to_string(),
        })?;

    if record.duration_ms() < 0.0 {
        return Err(AnalyticsError::MalformedRecord {
            line,
            message: "duration_ms must be non-negative".to_string(),
        });
    }

    // Status is always derived from the output, never trusted from the writer.
    record.extra.remove("status");
    record.line = line;
    Ok(record)
}

/// Parse the full log text. Blank lines are skipped.
pub fn parse_log(text: &str) -> Result<Vec<LogRecord>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_line(idx + 1, line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_record() {
        let record = parse_line(
            1,
            r#"{"timestamp":"2024-01-01T10:00:00Z","command":"cli deploy","output":"OK","duration_ms":500}"#,
        )
        .unwrap();

        assert_eq!(record.timestamp.as_deref(), Some("2024-01-01T10:00:00Z"));
        assert_eq!(record.command.as_deref(), Some("cli deploy"));
        assert_eq!(record.output_text(), "OK");
        assert_eq!(record.duration_ms(), 500.0);
        assert_eq!(record.duration_secs(), 0.5);
        assert_eq!(record.line, 1);
    }

    #[test]
    fn test_missing_optional_fields_use_defaults() {
        let record = parse_line(3, r#"{"command":"cli"}"#).unwrap();
        assert_eq!(record.output_text(), "");
        assert_eq!(record.duration_ms(), 0.0);
        assert_eq!(record.subcommand().unwrap(), UNKNOWN_SUBCOMMAND);

        let err = record.require_timestamp().unwrap_err();
        assert!(matches!(err, AnalyticsError::BadRecord { line: 3, .. }));
    }

    #[test]
    fn test_subcommand_uses_second_token() {
        assert_eq!(subcommand_of("cli deploy --network testnet"), "deploy");
        assert_eq!(subcommand_of("  cli\tinvoke  "), "invoke");
        assert_eq!(subcommand_of("cli"), UNKNOWN_SUBCOMMAND);
        assert_eq!(subcommand_of(""), UNKNOWN_SUBCOMMAND);
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = parse_log("{\"command\":\"a b\"}\nnot json\n").unwrap_err();
        assert!(matches!(err, AnalyticsError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn test_wrong_field_type_is_malformed() {
        let err = parse_line(1, r#"{"duration_ms":"fast"}"#).unwrap_err();
        assert!(matches!(err, AnalyticsError::MalformedRecord { .. }));

        let err = parse_line(1, r#"{"duration_ms":-4}"#).unwrap_err();
        assert!(matches!(err, AnalyticsError::MalformedRecord { .. }));
    }

    #[test]
    fn test_blank_lines_are_skipped_and_line_numbers_kept() {
        let records = parse_log("{\"command\":\"a\"}\n\n   \r\n{\"command\":\"b\"}\r\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line, 1);
        assert_eq!(records[1].line, 4);
    }

    #[test]
    fn test_extra_fields_preserved_and_status_dropped() {
        let record = parse_line(1, r#"{"id":7,"user":"alice","status":"success","duration_ms":12}"#)
            .unwrap();
        assert_eq!(record.extra.get("id"), Some(&Value::from(7)));
        assert!(!record.extra.contains_key("status"));

        let echoed = serde_json::to_value(&record).unwrap();
        assert_eq!(echoed["duration_ms"], Value::from(12));
        assert_eq!(echoed["user"], Value::from("alice"));
    }
}
