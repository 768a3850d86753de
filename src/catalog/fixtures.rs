//! Small hand-built catalogs for unit tests

use crate::types::{
    Ally, Catalog, Choice, DialogueEvent, Impact, Item, Position, RoleInfo, RoleTable,
    ScenarioStage,
};

pub(crate) fn item(id: &str) -> Item {
    Item {
        id: id.to_string(),
        name: format!("{id} name"),
        description: format!("{id} description"),
        icon: "*".to_string(),
    }
}

pub(crate) fn ally(id: &str) -> Ally {
    Ally {
        id: id.to_string(),
        name: format!("{id} name"),
        icon: "@".to_string(),
        description: format!("{id} description"),
        role: "helper".to_string(),
    }
}

pub(crate) fn event(ally_id: &str, x: f32, y: f32) -> DialogueEvent {
    DialogueEvent {
        ally: ally(ally_id),
        trigger: String::new(),
        dialogue: format!("{ally_id} says hello"),
        effect: "help".to_string(),
        pos: Position::new(x, y),
    }
}

pub(crate) fn choice(text: &str, chaos: i32, risk: i32, item: Option<Item>, is_best: bool) -> Choice {
    Choice {
        text: text.to_string(),
        is_best,
        impact: Impact { chaos, risk, item },
        feedback: format!("{text} done"),
    }
}

/// A stage where every role sees the same events and choices
pub(crate) fn stage(id: u32, events: Vec<DialogueEvent>, choices: Vec<Choice>) -> ScenarioStage {
    ScenarioStage {
        id,
        time: format!("{:02}:00", 14 + id),
        title: format!("Stage {id}"),
        description: format!("Stage {id} description"),
        events: RoleTable::from_fn(|_| events.clone()),
        choices: RoleTable::from_fn(|_| choices.clone()),
    }
}

pub(crate) fn catalog(stages: Vec<ScenarioStage>) -> Catalog {
    Catalog {
        title: "Test drill".to_string(),
        prologue: "It begins.".to_string(),
        restart_prologue: "Again.".to_string(),
        roles: RoleTable::from_fn(|role| RoleInfo {
            name: role.to_string(),
            title: "title".to_string(),
            description: "description".to_string(),
            base_item: item(&format!("BASE_{role}")),
        }),
        stages,
    }
}
