//! Shared catalog builders for integration tests
#![allow(dead_code)]

use incident_drill::{Direction, Drill, Role};
use serde_json::{Value, json};

pub const ROLE_KEYS: [&str; 5] = ["COMMUNICATOR", "TECH_LEADER", "CONTROL_TOWER", "MAGE", "REPORTER"];

/// Same value under every role key
fn per_role(value: Value) -> Value {
    Value::Object(
        ROLE_KEYS
            .iter()
            .map(|key| (key.to_string(), value.clone()))
            .collect(),
    )
}

/// A catalog document with one stage per `(chaos, risk)` pair
///
/// Every stage has a single ally straight above the start position at
/// (50, 40) and a single choice granting item `ITEM_<stage>`.
pub fn catalog_json(deltas: &[(i32, i32)]) -> String {
    let stages: Vec<Value> = deltas
        .iter()
        .enumerate()
        .map(|(i, (chaos, risk))| {
            let id = i + 1;
            json!({
                "id": id,
                "time": format!("{:02}:00", 14 + id),
                "title": format!("Stage {id}"),
                "description": "Something is on fire.",
                "events": per_role(json!([{
                    "ally": "guard",
                    "dialogue": "Over here!",
                    "pos": { "x": 50.0, "y": 40.0 }
                }])),
                "choices": per_role(json!([{
                    "text": "Handle it",
                    "is_best": *chaos <= 0,
                    "impact": { "chaos": chaos, "risk": risk, "item": format!("ITEM_{id}") },
                    "feedback": format!("Stage {id} handled")
                }]))
            })
        })
        .collect();

    let mut items: Vec<Value> = (1..=deltas.len())
        .map(|id| {
            json!({
                "id": format!("ITEM_{id}"),
                "name": format!("Item {id}"),
                "description": "A useful thing",
                "icon": "*"
            })
        })
        .collect();
    items.push(json!({ "id": "BADGE", "name": "Badge", "description": "Standard issue", "icon": "#" }));

    json!({
        "title": "Test drill",
        "prologue": "The alarms are ringing.",
        "restart_prologue": "Once more.",
        "roles": per_role(json!({
            "name": "Responder",
            "title": "Hero",
            "description": "Keeps things running",
            "base_item": "BADGE"
        })),
        "items": items,
        "allies": [
            { "id": "guard", "name": "Guard", "icon": "G", "description": "Watches the gate", "role": "support" }
        ],
        "stages": stages
    })
    .to_string()
}

/// Select a role and walk into the stage's only dialogue
pub fn enter_dialogue(drill: &mut Drill) {
    for _ in 0..3 {
        drill.walk(Direction::Up).expect("walk");
    }
    assert!(
        drill.state().interacting_with().is_some(),
        "expected an open dialogue at {:?}",
        drill.state().position
    );
}

/// Choose the first answer and advance
pub fn play_stage(drill: &mut Drill) {
    enter_dialogue(drill);
    drill.choose(0).expect("choose");
    drill.advance().expect("advance");
}

pub fn start(drill: &mut Drill, role: Role) {
    drill.select_role(role).expect("select role");
}
