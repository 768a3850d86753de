//! Debug logging for runtime execution
//!
//! The runtime logs through the `log` facade with one target per category.
//! [`install`] registers a stderr logger that filters by level and category.

use log::{LevelFilter, Log, Metadata, Record};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const ENGINE: &str = "incident_drill::engine";
pub const PROXIMITY: &str = "incident_drill::proximity";
pub const METERS: &str = "incident_drill::meters";
pub const FLOW: &str = "incident_drill::flow";
pub const ASSETS: &str = "incident_drill::assets";
pub const CATALOG: &str = "incident_drill::catalog";

/// Debug log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    /// All internal state changes
    Trace,
    /// Development debugging information
    Debug,
    /// Important state changes
    Info,
    /// Potential issues
    Warn,
    /// Error situations
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

/// Debug log category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebugCategory {
    /// Event dispatch
    Engine,
    /// Proximity checks on movement
    Proximity,
    /// Meter and inventory changes
    Meters,
    /// Stage transitions and endings
    Flow,
    /// Asset collaborator traffic
    Assets,
    /// Catalog loading
    Catalog,
}

impl DebugCategory {
    pub fn target(&self) -> &'static str {
        match self {
            DebugCategory::Engine => ENGINE,
            DebugCategory::Proximity => PROXIMITY,
            DebugCategory::Meters => METERS,
            DebugCategory::Flow => FLOW,
            DebugCategory::Assets => ASSETS,
            DebugCategory::Catalog => CATALOG,
        }
    }

    fn from_target(target: &str) -> Option<Self> {
        [
            DebugCategory::Engine,
            DebugCategory::Proximity,
            DebugCategory::Meters,
            DebugCategory::Flow,
            DebugCategory::Assets,
            DebugCategory::Catalog,
        ]
        .into_iter()
        .find(|category| category.target() == target)
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Enable debug logging
    pub enabled: bool,
    /// Minimum log level
    pub level: LogLevel,
    /// Enabled categories
    pub categories: HashSet<DebugCategory>,
}

impl Default for DebugConfig {
    fn default() -> Self {
        let mut categories = HashSet::new();
        categories.insert(DebugCategory::Engine);
        categories.insert(DebugCategory::Meters);
        categories.insert(DebugCategory::Flow);

        Self {
            enabled: std::env::var("INCIDENT_DRILL_DEBUG").is_ok(),
            level: LogLevel::Debug,
            categories,
        }
    }
}

impl DebugConfig {
    /// Everything, down to trace level
    pub fn verbose() -> Self {
        Self {
            enabled: true,
            level: LogLevel::Trace,
            categories: [
                DebugCategory::Engine,
                DebugCategory::Proximity,
                DebugCategory::Meters,
                DebugCategory::Flow,
                DebugCategory::Assets,
                DebugCategory::Catalog,
            ]
            .into_iter()
            .collect(),
        }
    }

    /// Whether a record with this target and level passes the filter
    pub fn allows(&self, target: &str, level: log::Level) -> bool {
        if !self.enabled || level > LevelFilter::from(self.level) {
            return false;
        }
        match DebugCategory::from_target(target) {
            Some(category) => self.categories.contains(&category),
            // Records from outside the crate only pass at warn or above
            None => level <= log::Level::Warn,
        }
    }
}

/// Stderr logger filtered by a [`DebugConfig`]
#[derive(Debug)]
pub struct DebugLogger {
    config: DebugConfig,
}

impl DebugLogger {
    pub fn new(config: DebugConfig) -> Self {
        Self { config }
    }
}

impl Log for DebugLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.config.allows(metadata.target(), metadata.level())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let category = record
            .target()
            .rsplit("::")
            .next()
            .unwrap_or_else(|| record.target());
        eprintln!("[{}] {:10} {}", record.level(), category, record.args());
    }

    fn flush(&self) {}
}

/// Register the stderr logger as the global `log` backend
///
/// Fails if another logger was installed first.
pub fn install(config: DebugConfig) -> Result<(), log::SetLoggerError> {
    let max_level = if config.enabled {
        LevelFilter::from(config.level)
    } else {
        LevelFilter::Off
    };
    log::set_logger(Box::leak(Box::new(DebugLogger::new(config))))?;
    log::set_max_level(max_level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_config_default() {
        let config = DebugConfig::default();
        assert!(!config.enabled || std::env::var("INCIDENT_DRILL_DEBUG").is_ok());
        assert!(config.categories.contains(&DebugCategory::Engine));
        assert!(!config.categories.contains(&DebugCategory::Proximity));
    }

    #[test]
    fn allows_filters_by_level_and_category() {
        let mut config = DebugConfig::default();
        config.enabled = true;

        assert!(config.allows(ENGINE, log::Level::Debug));
        assert!(!config.allows(ENGINE, log::Level::Trace));
        assert!(!config.allows(PROXIMITY, log::Level::Debug));
        assert!(!config.allows("some_crate", log::Level::Info));
        assert!(config.allows("some_crate", log::Level::Warn));

        config.enabled = false;
        assert!(!config.allows(ENGINE, log::Level::Error));
    }

    #[test]
    fn verbose_enables_everything() {
        let config = DebugConfig::verbose();
        assert!(config.allows(PROXIMITY, log::Level::Trace));
        assert!(config.allows(ASSETS, log::Level::Trace));
    }
}
