//! Resolved scenario catalog
//!
//! These are the read-only content types the runtime works against. They are
//! produced by [`crate::catalog::load`], which resolves ally/item references
//! and runs the lint pass before handing a `Catalog` out.

use crate::types::{Position, Role, RoleTable, SessionState};
use serde::{Deserialize, Serialize};

/// An item that can be granted to the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
}

/// A non-player character offering dialogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ally {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
    /// Functional label shown next to the name
    pub role: String,
}

/// A positioned dialogue trigger for one stage and one role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueEvent {
    pub ally: Ally,
    /// Cosmetic description of what triggers the event
    pub trigger: String,
    pub dialogue: String,
    /// Cosmetic description of the help the ally offers
    pub effect: String,
    pub pos: Position,
}

/// Effect of a choice on meters and inventory
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Impact {
    pub chaos: i32,
    pub risk: i32,
    pub item: Option<Item>,
}

/// A selectable response within a dialogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    /// Marks the optimal answer; only affects the history marker
    pub is_best: bool,
    pub impact: Impact,
    pub feedback: String,
}

/// One scripted chapter of the scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioStage {
    /// 1-based, contiguous
    pub id: u32,
    /// Display time label, e.g. "15:00"
    pub time: String,
    pub title: String,
    pub description: String,
    pub events: RoleTable<Vec<DialogueEvent>>,
    pub choices: RoleTable<Vec<Choice>>,
}

/// Presentation metadata for a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleInfo {
    pub name: String,
    pub title: String,
    pub description: String,
    pub base_item: Item,
}

/// The complete, validated scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub title: String,
    /// Seed history line for a fresh session
    pub prologue: String,
    /// Seed history line after a restart
    pub restart_prologue: String,
    pub roles: RoleTable<RoleInfo>,
    pub stages: Vec<ScenarioStage>,
}

impl Catalog {
    pub fn stage_count(&self) -> u32 {
        self.stages.len() as u32
    }

    pub fn stage(&self, id: u32) -> Option<&ScenarioStage> {
        self.stages.iter().find(|stage| stage.id == id)
    }

    /// Dialogue events of a stage for a role; empty if the stage does not exist
    pub fn events(&self, stage: u32, role: Role) -> &[DialogueEvent] {
        self.stage(stage)
            .map(|s| s.events.get(role).as_slice())
            .unwrap_or(&[])
    }

    /// Choices of a stage for a role; empty if the stage does not exist
    pub fn choices(&self, stage: u32, role: Role) -> &[Choice] {
        self.stage(stage)
            .map(|s| s.choices.get(role).as_slice())
            .unwrap_or(&[])
    }

    pub fn role_info(&self, role: Role) -> &RoleInfo {
        self.roles.get(role)
    }

    /// Derived view data for the session's current stage and role
    pub fn view<'a>(&'a self, state: &SessionState) -> Option<StageView<'a>> {
        let role = state.role?;
        let stage = self.stage(state.stage)?;
        Some(StageView {
            stage,
            events: stage.events.get(role),
            choices: stage.choices.get(role),
        })
    }

    /// md5 hex digest of the catalog content
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let bytes = serde_json::to_vec(self)?;
        Ok(format!("{:x}", md5::compute(bytes)))
    }
}

/// Read-only view of the active stage for the active role
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageView<'a> {
    pub stage: &'a ScenarioStage,
    pub events: &'a [DialogueEvent],
    pub choices: &'a [Choice],
}
