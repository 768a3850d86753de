//! Scenario catalog loading
//!
//! Loading is the only place content errors surface: the document is parsed,
//! ally/item references are resolved, and the lint pass runs. A catalog that
//! comes out of here is safe to play.

use crate::lint::{self, LintResult, config::LintConfig};
use crate::rules::RulesConfig;
use crate::types::{
    Ally, Catalog, Choice, DialogueEvent, Impact, Item, RoleInfo, ScenarioStage,
};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

pub mod schema;

#[cfg(test)]
pub(crate) mod fixtures;

use schema::{CatalogFile, ChoiceEntry, EventEntry};

/// The built-in "Kingdom of Service" drill
const BUILTIN: &str = include_str!("../../scenarios/kingdom_of_service.json");

/// Malformed scenario content
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid catalog document: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("Duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Unknown {kind} '{id}' referenced by {context}")]
    UnknownReference {
        kind: &'static str,
        id: String,
        context: String,
    },

    #[error("Catalog failed validation with {} error(s)", .0.error_count)]
    Invalid(LintResult),
}

/// Load and validate a catalog with default rules and lint settings
pub fn load(json: &str) -> Result<Catalog, CatalogError> {
    load_with_config(json, &RulesConfig::default(), &LintConfig::default()).map(|(c, _)| c)
}

/// Load and validate a catalog, returning the lint result alongside it
///
/// Lint errors reject the catalog; warnings and info are handed back.
pub fn load_with_config(
    json: &str,
    rules: &RulesConfig,
    config: &LintConfig,
) -> Result<(Catalog, LintResult), CatalogError> {
    let file: CatalogFile = serde_json::from_str(json)?;
    let catalog = resolve(file)?;
    let report = lint::lint_with_config(&catalog, rules, config);

    if report.has_errors() {
        log::debug!(target: crate::runtime::debug::CATALOG, "rejecting catalog: {:?}", report.issues);
        return Err(CatalogError::Invalid(report));
    }

    log::debug!(
        target: crate::runtime::debug::CATALOG,
        "loaded '{}' with {} stage(s), {} warning(s)",
        catalog.title,
        catalog.stage_count(),
        report.warning_count
    );
    Ok((catalog, report))
}

/// Read a catalog file and load it
pub async fn load_file(
    path: impl AsRef<Path>,
    rules: &RulesConfig,
    config: &LintConfig,
) -> anyhow::Result<(Catalog, LintResult)> {
    let path = path.as_ref();
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read catalog file {}: {}", path.display(), e))?;
    Ok(load_with_config(&json, rules, config)?)
}

/// The embedded scenario
pub fn builtin() -> Result<Catalog, CatalogError> {
    load(BUILTIN)
}

/// The embedded scenario, validated against custom rules
pub fn builtin_with_rules(rules: &RulesConfig) -> Result<Catalog, CatalogError> {
    load_with_config(BUILTIN, rules, &LintConfig::default()).map(|(c, _)| c)
}

/// Resolve ally/item references into runtime types
pub fn resolve(file: CatalogFile) -> Result<Catalog, CatalogError> {
    let items = index_by_id("item", file.items, |item: &Item| item.id.clone())?;
    let allies = index_by_id("ally", file.allies, |ally: &Ally| ally.id.clone())?;

    let roles = file.roles.try_map(|role, entry| {
        let base_item = lookup(&items, "item", &entry.base_item, || format!("role {role}"))?;
        Ok::<_, CatalogError>(RoleInfo {
            name: entry.name,
            title: entry.title,
            description: entry.description,
            base_item,
        })
    })?;

    let mut stages = Vec::with_capacity(file.stages.len());
    for stage in file.stages {
        let id = stage.id;
        let events = stage.events.try_map(|role, entries| {
            entries
                .into_iter()
                .map(|entry| resolve_event(entry, &allies, || format!("stage {id} event for {role}")))
                .collect::<Result<Vec<_>, _>>()
        })?;
        let choices = stage.choices.try_map(|role, entries| {
            entries
                .into_iter()
                .map(|entry| resolve_choice(entry, &items, || format!("stage {id} choice for {role}")))
                .collect::<Result<Vec<_>, _>>()
        })?;
        stages.push(ScenarioStage {
            id,
            time: stage.time,
            title: stage.title,
            description: stage.description,
            events,
            choices,
        });
    }

    Ok(Catalog {
        title: file.title,
        prologue: file.prologue,
        restart_prologue: file.restart_prologue,
        roles,
        stages,
    })
}

fn resolve_event(
    entry: EventEntry,
    allies: &HashMap<String, Ally>,
    context: impl Fn() -> String,
) -> Result<DialogueEvent, CatalogError> {
    Ok(DialogueEvent {
        ally: lookup(allies, "ally", &entry.ally, context)?,
        trigger: entry.trigger,
        dialogue: entry.dialogue,
        effect: entry.effect,
        pos: entry.pos,
    })
}

fn resolve_choice(
    entry: ChoiceEntry,
    items: &HashMap<String, Item>,
    context: impl Fn() -> String,
) -> Result<Choice, CatalogError> {
    let item = match &entry.impact.item {
        Some(id) => Some(lookup(items, "item", id, context)?),
        None => None,
    };
    Ok(Choice {
        text: entry.text,
        is_best: entry.is_best,
        impact: Impact {
            chaos: entry.impact.chaos,
            risk: entry.impact.risk,
            item,
        },
        feedback: entry.feedback,
    })
}

fn index_by_id<T>(
    kind: &'static str,
    values: Vec<T>,
    id_of: impl Fn(&T) -> String,
) -> Result<HashMap<String, T>, CatalogError> {
    let mut index = HashMap::with_capacity(values.len());
    for value in values {
        let id = id_of(&value);
        if index.contains_key(&id) {
            return Err(CatalogError::DuplicateId { kind, id });
        }
        index.insert(id, value);
    }
    Ok(index)
}

fn lookup<T: Clone>(
    index: &HashMap<String, T>,
    kind: &'static str,
    id: &str,
    context: impl Fn() -> String,
) -> Result<T, CatalogError> {
    index
        .get(id)
        .cloned()
        .ok_or_else(|| CatalogError::UnknownReference {
            kind,
            id: id.to_string(),
            context: context(),
        })
}
