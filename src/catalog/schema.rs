//! On-disk catalog document
//!
//! Allies and items are declared once and referenced by id from stages and
//! roles; [`super::resolve`] turns these entries into the runtime types.

use crate::types::{Ally, Item, Position, RoleTable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    pub title: String,
    pub prologue: String,
    pub restart_prologue: String,
    pub roles: RoleTable<RoleEntry>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub allies: Vec<Ally>,
    pub stages: Vec<StageEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleEntry {
    pub name: String,
    pub title: String,
    pub description: String,
    /// Item id
    pub base_item: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StageEntry {
    pub id: u32,
    pub time: String,
    pub title: String,
    pub description: String,
    pub events: RoleTable<Vec<EventEntry>>,
    pub choices: RoleTable<Vec<ChoiceEntry>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventEntry {
    /// Ally id
    pub ally: String,
    #[serde(default)]
    pub trigger: String,
    pub dialogue: String,
    #[serde(default)]
    pub effect: String,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChoiceEntry {
    pub text: String,
    #[serde(default)]
    pub is_best: bool,
    #[serde(default)]
    pub impact: ImpactEntry,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImpactEntry {
    #[serde(default)]
    pub chaos: i32,
    #[serde(default)]
    pub risk: i32,
    /// Item id
    #[serde(default)]
    pub item: Option<String>,
}
