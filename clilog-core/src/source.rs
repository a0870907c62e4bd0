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

//! Where log text comes from.
//!
//! A source is read in full on every call. There is no caching and no
//! locking: concurrent readers of an append-only file may see a partially
//! written last line, which then fails that one request.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{AnalyticsError, Result};

pub trait LogSource: Send + Sync {
    /// Read the entire log.
    fn read_to_string(&self) -> Result<String>;

    /// Human-readable location, for logs and health output.
    fn describe(&self) -> String;
}

/// Newline-delimited JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileLogSource {
    path: PathBuf,
}

impl FileLogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSource for FileLogSource {
    fn read_to_string(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AnalyticsError::SourceNotFound {
                path: self.path.clone(),
            },
            _ => AnalyticsError::Io {
                path: self.path.clone(),
                source: e,
            },
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fixed in-memory log text.
#[derive(Debug, Clone, Default)]
pub struct StaticLogSource {
    text: String,
}

impl StaticLogSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Build a source from individual lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for line in lines {
            text.push_str(line.as_ref());
            text.push('\n');
        }
        Self { text }
    }
}

impl LogSource for StaticLogSource {
    fn read_to_string(&self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileLogSource::new(dir.path().join("cli_logs.jsonl"));
        assert!(matches!(
            source.read_to_string(),
            Err(AnalyticsError::SourceNotFound { .. })
        ));
    }

    #[test]
    fn test_reads_fresh_on_every_call() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let source = FileLogSource::new(file.path());
        assert_eq!(source.read_to_string().unwrap(), "");

        writeln!(file, r#"{{"command":"cli deploy"}}"#).unwrap();
        file.flush().unwrap();
        assert_eq!(source.read_to_string().unwrap().lines().count(), 1);
    }

    #[test]
    fn test_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileLogSource::new(dir.path());
        assert!(matches!(
            source.read_to_string(),
            Err(AnalyticsError::Io { .. })
        ));
    }

    #[test]
    fn test_static_from_lines() {
        let source = StaticLogSource::from_lines(["a", "b"]);
        assert_eq!(source.read_to_string().unwrap(), "a\nb\n");
        assert_eq!(source.describe(), "<memory>");
    }
}
