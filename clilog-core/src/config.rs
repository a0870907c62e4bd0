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

//! Analytics options
//!
//! Ranking limits and the two behaviour flags for the dashboard quirks. The
//! defaults reproduce the established dashboard output; the non-default
//! variants are explicit behaviour changes.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SUGGESTION: &str = "Improve logic or check configuration";

/// What the `frequency` field of a slow command reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlowCommandFrequency {
    /// Always `1`.
    #[default]
    Placeholder,
    /// Number of records with exactly the same command text.
    Counted,
}

/// Which frequent-error groups `criticalErrors` counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticalErrorScope {
    /// Only groups that made it into the truncated top-N list.
    #[default]
    TopFrequent,
    /// Every frequent-error group.
    AllGroups,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsOptions {
    /// Entries in `slowCommands`
    #[serde(default = "default_slow_command_limit")]
    pub slow_command_limit: usize,

    /// Entries in `frequentErrors`
    #[serde(default = "default_frequent_error_limit")]
    pub frequent_error_limit: usize,

    /// A frequent-error group with at least this many occurrences is critical
    #[serde(default = "default_critical_error_threshold")]
    pub critical_error_threshold: usize,

    /// Suggestion text attached to every frequent error
    #[serde(default = "default_suggestion")]
    pub suggestion: String,

    #[serde(default)]
    pub slow_command_frequency: SlowCommandFrequency,

    #[serde(default)]
    pub critical_error_scope: CriticalErrorScope,
}

fn default_slow_command_limit() -> usize {
    5
}

fn default_frequent_error_limit() -> usize {
    5
}

fn default_critical_error_threshold() -> usize {
    10
}

fn default_suggestion() -> String {
    DEFAULT_SUGGESTION.to_string()
}

impl Default for AnalyticsOptions {
    fn default() -> Self {
        Self {
            slow_command_limit: default_slow_command_limit(),
            frequent_error_limit: default_frequent_error_limit(),
            critical_error_threshold: default_critical_error_threshold(),
            suggestion: default_suggestion(),
            slow_command_frequency: SlowCommandFrequency::default(),
            critical_error_scope: CriticalErrorScope::default(),
        }
    }
}
