//! Stage structure checking implementation

use crate::lint::config::LintConfig;
use crate::lint::{LintLevel, LintResult};
use crate::types::Catalog;

const CATEGORY: &str = "structure";

/// Check stage ordering and per-role playability
pub fn check(catalog: &Catalog, result: &mut LintResult, config: &LintConfig) {
    if catalog.stages.is_empty() {
        result.report(LintLevel::Error, CATEGORY, "catalog", "Catalog has no stages");
        return;
    }

    check_stage_ids(catalog, result);
    check_roles(catalog, result, config);
}

fn check_stage_ids(catalog: &Catalog, result: &mut LintResult) {
    for (index, stage) in catalog.stages.iter().enumerate() {
        let expected = index as u32 + 1;
        if stage.id != expected {
            result.report(
                LintLevel::Error,
                CATEGORY,
                format!("stage #{expected}"),
                format!("Stage id {} breaks the sequence, expected {}", stage.id, expected),
            );
        }
    }
}

fn check_roles(catalog: &Catalog, result: &mut LintResult, config: &LintConfig) {
    for stage in &catalog.stages {
        for (role, events) in stage.events.iter() {
            let choices = stage.choices.get(role);
            let location = format!("stage {} / {}", stage.id, role);

            if events.is_empty() {
                // Nothing to walk up to, so the role can never resolve this stage
                result.report(
                    LintLevel::Warning,
                    CATEGORY,
                    location,
                    "No dialogue events; the stage cannot be completed",
                );
                continue;
            }

            if choices.is_empty() {
                result.report(
                    LintLevel::Error,
                    CATEGORY,
                    location,
                    "Dialogue events exist but there are no choices to resolve them",
                );
                continue;
            }

            if config.structure.check_best_choice && !choices.iter().any(|c| c.is_best) {
                result.report(
                    LintLevel::Info,
                    CATEGORY,
                    location,
                    "No choice is marked as optimal",
                );
            }
        }
    }
}
