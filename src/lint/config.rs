//! Lint configuration

use serde::{Deserialize, Serialize};

/// Lint configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LintConfig {
    /// Structure checks configuration
    pub structure: StructureConfig,
    /// Content checks configuration
    pub content: ContentConfig,
    /// Placement checks configuration
    pub placement: PlacementConfig,
}

/// Structure checking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureConfig {
    /// Enable structure checks
    pub enabled: bool,
    /// Report stages without an optimal choice for a role
    pub check_best_choice: bool,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            check_best_choice: true,
        }
    }
}

/// Content checking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Enable content checks
    pub enabled: bool,
    /// Largest accepted absolute meter delta of a single choice
    pub max_impact_magnitude: i32,
    /// Maximum text length (characters)
    pub max_text_length: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_impact_magnitude: 100,
            max_text_length: 200,
        }
    }
}

/// Placement checking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Enable placement checks
    pub enabled: bool,
    /// Report events close enough to overlap
    pub check_overlap: bool,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            check_overlap: true,
        }
    }
}
