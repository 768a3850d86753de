//! Event placement checking implementation

use crate::lint::config::LintConfig;
use crate::lint::{LintLevel, LintResult};
use crate::rules::RulesConfig;
use crate::types::{Catalog, Position};

const CATEGORY: &str = "placement";

/// Check that events sit on the map and can be reached by walking
pub fn check(catalog: &Catalog, result: &mut LintResult, rules: &RulesConfig, config: &LintConfig) {
    for stage in &catalog.stages {
        for (role, events) in stage.events.iter() {
            for (index, event) in events.iter().enumerate() {
                let location = format!("stage {} / {} / event {}", stage.id, role, index + 1);
                let Position { x, y } = event.pos;

                if !(0.0..=100.0).contains(&x) || !(0.0..=100.0).contains(&y) {
                    result.report(
                        LintLevel::Error,
                        CATEGORY,
                        location,
                        format!("Position ({x}, {y}) is outside the 0-100 map"),
                    );
                    continue;
                }

                let gap = closest_approach(event.pos, rules);
                if gap >= rules.interaction_radius {
                    result.report(
                        LintLevel::Warning,
                        CATEGORY,
                        location.clone(),
                        format!(
                            "'{}' can never be reached: closest approach {:.1} >= radius {:.1}",
                            event.ally.name, gap, rules.interaction_radius
                        ),
                    );
                }

                if config.placement.check_overlap {
                    for (other_index, other) in events.iter().enumerate().skip(index + 1) {
                        if event.pos.distance_to(&other.pos) < rules.interaction_radius {
                            result.report(
                                LintLevel::Info,
                                CATEGORY,
                                location.clone(),
                                format!(
                                    "Overlaps event {}; the earlier event wins while both are in range",
                                    other_index + 1
                                ),
                            );
                        }
                    }
                }
            }
        }
    }
}

/// Smallest distance between `target` and any position the player can stand on
///
/// Moves are axis-aligned steps from the start position, clamped to the
/// movement bounds, so each axis can be solved on its own.
pub fn closest_approach(target: Position, rules: &RulesConfig) -> f32 {
    let dx = axis_gap(target.x, rules.start_position.x, rules);
    let dy = axis_gap(target.y, rules.start_position.y, rules);
    (dx * dx + dy * dy).sqrt()
}

fn axis_gap(target: f32, start: f32, rules: &RulesConfig) -> f32 {
    let (min, max) = (rules.min_coord, rules.max_coord);
    let steps = ((target - start) / rules.move_step).round();
    let on_grid = (start + steps * rules.move_step).clamp(min, max);

    [on_grid, min, max]
        .into_iter()
        .map(|v| (v - target).abs())
        .fold(f32::INFINITY, f32::min)
}
