//! Tunable rule constants

use crate::types::Position;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Rule constants for movement, proximity and endings
///
/// Every field has a default, so a rules file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    /// Distance below which a dialogue event is in range
    pub interaction_radius: f32,
    /// Distance covered by one move intent
    pub move_step: f32,
    /// Lower movement bound on both axes
    pub min_coord: f32,
    /// Upper movement bound on both axes
    pub max_coord: f32,
    /// Where the player stands at the start of every stage
    pub start_position: Position,
    pub initial_chaos: i32,
    pub initial_risk: i32,
    /// A meter at or above this value ends the game on the next advance
    pub game_over_threshold: u8,
    /// Both meters must end strictly below this value for a success
    pub success_threshold: u8,
    /// Start the inventory with the role's base item
    pub grant_base_item: bool,
    /// How long the "item acquired" alert stays on screen
    pub item_alert_ms: u64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            interaction_radius: 5.0,
            move_step: 2.5,
            min_coord: 5.0,
            max_coord: 95.0,
            start_position: Position::new(50.0, 50.0),
            initial_chaos: 30,
            initial_risk: 10,
            game_over_threshold: 90,
            success_threshold: 80,
            grant_base_item: false,
            item_alert_ms: 3000,
        }
    }
}

/// Invalid rule configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RulesError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("Movement bounds are inverted: min {min} > max {max}")]
    InvertedBounds { min: f32, max: f32 },

    #[error("Start position ({x}, {y}) lies outside the movement bounds")]
    StartOutOfBounds { x: f32, y: f32 },

    #[error("{field} must be within 0..=100, got {value}")]
    OutOfRange { field: &'static str, value: i64 },
}

impl RulesConfig {
    /// Load overrides from a JSON file and validate them
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read rules file {}: {}", path.display(), e))?;
        Self::from_json(&text)
    }

    /// Parse overrides from JSON and validate them
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let rules: RulesConfig = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), RulesError> {
        if self.interaction_radius <= 0.0 {
            return Err(RulesError::NotPositive {
                field: "interaction_radius",
                value: self.interaction_radius,
            });
        }
        if self.move_step <= 0.0 {
            return Err(RulesError::NotPositive {
                field: "move_step",
                value: self.move_step,
            });
        }
        if self.min_coord > self.max_coord {
            return Err(RulesError::InvertedBounds {
                min: self.min_coord,
                max: self.max_coord,
            });
        }
        let Position { x, y } = self.start_position;
        let in_bounds = |v: f32| v >= self.min_coord && v <= self.max_coord;
        if !in_bounds(x) || !in_bounds(y) {
            return Err(RulesError::StartOutOfBounds { x, y });
        }
        for (field, value) in [
            ("initial_chaos", i64::from(self.initial_chaos)),
            ("initial_risk", i64::from(self.initial_risk)),
            ("game_over_threshold", i64::from(self.game_over_threshold)),
            ("success_threshold", i64::from(self.success_threshold)),
        ] {
            if !(0..=100).contains(&value) {
                return Err(RulesError::OutOfRange { field, value });
            }
        }
        Ok(())
    }
}
