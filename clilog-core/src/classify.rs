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

//! Output classification
//!
//! Derives a [`Status`] and, for errors, an [`ErrorCategory`] from free-text
//! command output. Matching is case-insensitive and substring-based: a
//! message containing "param" anywhere, even mid-word, is an invalid
//! parameter error.
//!
//! Categories come from an ordered rule list evaluated first-match-wins, so
//! new categories can be added without touching the aggregators.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Derived outcome of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// An error category as shown on the dashboard.
///
/// `name` labels the pie chart slice; `group` is the coarser label attached
/// to frequent-error entries. The two differ for some categories.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorCategory {
    name: Cow<'static, str>,
    group: Cow<'static, str>,
}

impl ErrorCategory {
    pub const GAS_LIMIT: ErrorCategory = ErrorCategory::fixed("Gas Limit", "Gas");
    pub const AUTHORIZATION: ErrorCategory = ErrorCategory::fixed("Authorization", "Auth");
    pub const NETWORK_TIMEOUT: ErrorCategory = ErrorCategory::fixed("Network Timeout", "Network");
    pub const INVALID_PARAMETERS: ErrorCategory =
        ErrorCategory::fixed("Invalid Parameters", "Contract Error");
    pub const CONTRACT_ERROR: ErrorCategory =
        ErrorCategory::fixed("Contract Error", "Contract Error");

    const fn fixed(name: &'static str, group: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            group: Cow::Borrowed(group),
        }
    }

    pub fn new(name: impl Into<Cow<'static, str>>, group: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> &str {
        &self.group
    }
}

type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// A (predicate, category) pair. The predicate always sees lowercase text.
pub struct Rule {
    predicate: Predicate,
    category: ErrorCategory,
}

impl Rule {
    pub fn new<F>(predicate: F, category: ErrorCategory) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(predicate),
            category,
        }
    }

    /// Matches when the output contains any of `needles` (case-insensitive).
    pub fn contains_any(needles: &[&str], category: ErrorCategory) -> Self {
        let needles: Vec<String> = needles.iter().map(|n| n.to_lowercase()).collect();
        Self::new(
            move |text| needles.iter().any(|n| text.contains(n.as_str())),
            category,
        )
    }

    pub fn matches(&self, lowered: &str) -> bool {
        (self.predicate)(lowered)
    }

    pub fn category(&self) -> &ErrorCategory {
        &self.category
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// Result of classifying one output text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification<'a> {
    pub status: Status,
    /// Present only for errors.
    pub category: Option<&'a ErrorCategory>,
}

impl Classification<'_> {
    pub fn is_error(&self) -> bool {
        self.status == Status::Error
    }
}

/// Ordered rule list plus the marker that makes an output an error.
#[derive(Debug)]
pub struct Classifier {
    error_marker: String,
    rules: Vec<Rule>,
    fallback: ErrorCategory,
}

impl Classifier {
    /// An empty classifier: every error falls into `fallback`.
    pub fn new(error_marker: &str, fallback: ErrorCategory) -> Self {
        Self {
            error_marker: error_marker.to_lowercase(),
            rules: Vec::new(),
            fallback,
        }
    }

    /// Append a rule. Rules are tried in insertion order.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn status(&self, output: &str) -> Status {
        if output.to_lowercase().contains(&self.error_marker) {
            Status::Error
        } else {
            Status::Success
        }
    }

    pub fn classify(&self, output: &str) -> Classification<'_> {
        let lowered = output.to_lowercase();
        if !lowered.contains(&self.error_marker) {
            return Classification {
                status: Status::Success,
                category: None,
            };
        }

        let category = self
            .rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(Rule::category)
            .unwrap_or(&self.fallback);

        Classification {
            status: Status::Error,
            category: Some(category),
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::new("error", ErrorCategory::CONTRACT_ERROR)
            .with_rule(Rule::contains_any(&["gas"], ErrorCategory::GAS_LIMIT))
            .with_rule(Rule::contains_any(
                &["auth", "signature"],
                ErrorCategory::AUTHORIZATION,
            ))
            .with_rule(Rule::contains_any(&["timeout"], ErrorCategory::NETWORK_TIMEOUT))
            .with_rule(Rule::contains_any(&["param"], ErrorCategory::INVALID_PARAMETERS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn category_of(output: &str) -> Option<ErrorCategory> {
        Classifier::default().classify(output).category.cloned()
    }

    #[test]
    fn test_status_is_case_insensitive() {
        let classifier = Classifier::default();
        assert_eq!(classifier.status("OK"), Status::Success);
        assert_eq!(classifier.status("ERROR: boom"), Status::Error);
        assert_eq!(classifier.status("unexpected Errors found"), Status::Error);
        assert_eq!(classifier.status(""), Status::Success);
    }

    #[test]
    fn test_success_has_no_category() {
        let classifier = Classifier::default();
        let result = classifier.classify("gas estimate ok");
        assert_eq!(result.status, Status::Success);
        assert!(result.category.is_none());
    }

    #[test]
    fn test_rule_priority() {
        // gas beats everything
        assert_eq!(
            category_of("Error: auth failed, gas exhausted, timeout"),
            Some(ErrorCategory::GAS_LIMIT)
        );
        assert_eq!(
            category_of("error: bad signature"),
            Some(ErrorCategory::AUTHORIZATION)
        );
        assert_eq!(
            category_of("error: Unauthorized"),
            Some(ErrorCategory::AUTHORIZATION)
        );
        assert_eq!(
            category_of("error: request TIMEOUT after param check"),
            Some(ErrorCategory::NETWORK_TIMEOUT)
        );
        assert_eq!(
            category_of("error: invalid parameter"),
            Some(ErrorCategory::INVALID_PARAMETERS)
        );
        assert_eq!(
            category_of("error: execution reverted"),
            Some(ErrorCategory::CONTRACT_ERROR)
        );
    }

    #[test]
    fn test_substring_matching_is_not_tokenized() {
        // "paramount" contains "param"
        assert_eq!(
            category_of("error: paramount failure"),
            Some(ErrorCategory::INVALID_PARAMETERS)
        );
    }

    #[test]
    fn test_name_and_group_differ() {
        let category = ErrorCategory::INVALID_PARAMETERS;
        assert_eq!(category.name(), "Invalid Parameters");
        assert_eq!(category.group(), "Contract Error");
    }

    #[test]
    fn test_custom_rules_extend_classification() {
        let classifier = Classifier::default().with_rule(Rule::new(
            |text| text.starts_with("error: disk"),
            ErrorCategory::new("Disk", "Infra"),
        ));

        let result = classifier.classify("Error: disk full");
        assert_eq!(result.category.map(ErrorCategory::name), Some("Disk"));
        // earlier rules still win
        let result = classifier.classify("Error: disk gas");
        assert_eq!(result.category.map(ErrorCategory::name), Some("Gas Limit"));
    }

    #[test]
    fn test_empty_rule_list_uses_fallback() {
        let classifier = Classifier::new("fail", ErrorCategory::new("Other", "Other"));
        let result = classifier.classify("FAIL: gas");
        assert_eq!(result.category.map(ErrorCategory::group), Some("Other"));
        assert_eq!(classifier.classify("error").status, Status::Success);
    }

    proptest! {
        #[test]
        fn prop_classification_is_pure(output in ".{0,64}") {
            let first = Classifier::default();
            let second = Classifier::default();
            // Warm up one classifier with unrelated input first.
            let _ = second.classify("error: gas");
            prop_assert_eq!(first.classify(&output), second.classify(&output));
            prop_assert_eq!(first.classify(&output), first.classify(&output));
        }

        #[test]
        fn prop_category_iff_error(output in ".{0,64}") {
            let classifier = Classifier::default();
            let result = classifier.classify(&output);
            prop_assert_eq!(result.category.is_some(), result.is_error());
            prop_assert_eq!(result.status, classifier.status(&output));
        }
    }
}
