//! Content checking implementation

use crate::lint::config::LintConfig;
use crate::lint::{LintLevel, LintResult};
use crate::types::Catalog;

const CATEGORY: &str = "content";

/// Check impact ranges and text quality
pub fn check(catalog: &Catalog, result: &mut LintResult, config: &LintConfig) {
    if catalog.prologue.trim().is_empty() {
        result.report(LintLevel::Warning, CATEGORY, "catalog", "Prologue is empty");
    }

    check_impacts(catalog, result, config);
    check_texts(catalog, result, config);
}

fn check_impacts(catalog: &Catalog, result: &mut LintResult, config: &LintConfig) {
    let max = config.content.max_impact_magnitude;

    for stage in &catalog.stages {
        for (role, choices) in stage.choices.iter() {
            for (index, choice) in choices.iter().enumerate() {
                for (meter, delta) in [("chaos", choice.impact.chaos), ("risk", choice.impact.risk)] {
                    if delta.unsigned_abs() > max.unsigned_abs() {
                        result.report(
                            LintLevel::Error,
                            CATEGORY,
                            format!("stage {} / {} / choice {}", stage.id, role, index + 1),
                            format!("{meter} delta {delta} exceeds the allowed magnitude {max}"),
                        );
                    }
                }
            }
        }
    }
}

fn check_texts(catalog: &Catalog, result: &mut LintResult, config: &LintConfig) {
    let max_len = config.content.max_text_length;
    let mut check_text = |location: String, what: &str, text: &str| {
        if text.trim().is_empty() {
            result.report(LintLevel::Warning, CATEGORY, location, format!("Empty {what}"));
        } else if text.chars().count() > max_len {
            result.report(
                LintLevel::Info,
                CATEGORY,
                location,
                format!("{what} is longer than {max_len} characters"),
            );
        }
    };

    for stage in &catalog.stages {
        check_text(format!("stage {}", stage.id), "title", &stage.title);

        for (role, events) in stage.events.iter() {
            for (index, event) in events.iter().enumerate() {
                let location = format!("stage {} / {} / event {}", stage.id, role, index + 1);
                check_text(location, "dialogue", &event.dialogue);
            }
        }

        for (role, choices) in stage.choices.iter() {
            for (index, choice) in choices.iter().enumerate() {
                let location = format!("stage {} / {} / choice {}", stage.id, role, index + 1);
                check_text(location.clone(), "choice text", &choice.text);
                check_text(location, "feedback", &choice.feedback);
            }
        }
    }
}
