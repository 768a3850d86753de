//! Lint module for scenario catalog checking
//!
//! This is the pre-flight validation pass run by the catalog loader:
//! - Structure: contiguous stage ids, every role playable in every stage
//! - Content: sane impact values, non-empty texts
//! - Placement: events on the map and reachable by the player

use crate::rules::RulesConfig;
use crate::types::Catalog;
use serde::{Deserialize, Serialize};

pub mod checks;
pub mod config;

/// Lint severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LintLevel {
    /// Error: the catalog is rejected
    Error,
    /// Warning: should be reviewed
    Warning,
    /// Info: for your information
    Info,
}

/// A lint issue found in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintIssue {
    /// Severity level
    pub level: LintLevel,
    /// Issue message
    pub message: String,
    /// Where in the catalog, e.g. "stage 2 / MAGE / choice 1"
    pub location: String,
    /// Category of the issue
    pub category: String,
}

/// Result of linting a catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintResult {
    /// Issues found
    pub issues: Vec<LintIssue>,
    /// Number of errors
    pub error_count: usize,
    /// Number of warnings
    pub warning_count: usize,
    /// Number of info messages
    pub info_count: usize,
}

impl LintResult {
    pub fn new() -> Self {
        Self {
            issues: Vec::new(),
            error_count: 0,
            warning_count: 0,
            info_count: 0,
        }
    }

    pub fn add_issue(&mut self, issue: LintIssue) {
        match issue.level {
            LintLevel::Error => self.error_count += 1,
            LintLevel::Warning => self.warning_count += 1,
            LintLevel::Info => self.info_count += 1,
        }
        self.issues.push(issue);
    }

    /// Shorthand used by the checks
    pub fn report(
        &mut self,
        level: LintLevel,
        category: &str,
        location: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.add_issue(LintIssue {
            level,
            message: message.into(),
            location: location.into(),
            category: category.to_string(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn errors(&self) -> impl Iterator<Item = &LintIssue> {
        self.issues.iter().filter(|i| i.level == LintLevel::Error)
    }
}

impl Default for LintResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Lint a catalog with default rules and configuration
pub fn lint(catalog: &Catalog) -> LintResult {
    lint_with_config(catalog, &RulesConfig::default(), &config::LintConfig::default())
}

/// Lint a catalog against specific rules and configuration
pub fn lint_with_config(
    catalog: &Catalog,
    rules: &RulesConfig,
    config: &config::LintConfig,
) -> LintResult {
    let mut result = LintResult::new();

    if config.structure.enabled {
        checks::structure::check(catalog, &mut result, config);
    }

    if config.content.enabled {
        checks::content::check(catalog, &mut result, config);
    }

    if config.placement.enabled {
        checks::placement::check(catalog, &mut result, rules, config);
    }

    result
}
