//! Tests for the runtime module

use super::*;
use crate::catalog::fixtures::{catalog, choice, event, item, stage};
use crate::types::{Outcome, Position, Status};
use std::collections::BTreeSet;

const UP: Event = Event::Move {
    direction: Direction::Up,
};
const DOWN: Event = Event::Move {
    direction: Direction::Down,
};

/// Two stages, one event straight above the start position at (50, 40)
fn two_stage_catalog() -> Catalog {
    catalog(vec![
        stage(
            1,
            vec![event("cx", 50.0, 40.0)],
            vec![
                choice("calm them", -15, 0, Some(item("FAQ_BUNDLE")), true),
                choice("ignore them", 20, 10, None, false),
            ],
        ),
        stage(
            2,
            vec![event("sage", 50.0, 40.0)],
            vec![choice("listen", -10, -5, Some(item("TECH_CORE")), true)],
        ),
    ])
}

fn fresh(catalog: &Catalog, rules: &RulesConfig) -> SessionState {
    SessionState::new(rules, catalog.prologue.clone())
}

fn run(
    mut state: SessionState,
    catalog: &Catalog,
    rules: &RulesConfig,
    events: &[Event],
) -> SessionState {
    for event in events {
        state = step(state, catalog, rules, *event).0;
    }
    state
}

/// Role selected and standing inside the stage-1 event radius
fn in_dialogue(catalog: &Catalog, rules: &RulesConfig) -> SessionState {
    let state = fresh(catalog, rules);
    run(
        state,
        catalog,
        rules,
        &[Event::SelectRole { role: Role::Mage }, UP, UP, UP],
    )
}

#[test]
fn select_role_starts_stage_one() {
    let catalog = two_stage_catalog();
    let rules = RulesConfig::default();
    let (state, output) = step(
        fresh(&catalog, &rules),
        &catalog,
        &rules,
        Event::SelectRole { role: Role::Reporter },
    );

    assert!(output.is_applied());
    assert_eq!(state.role, Some(Role::Reporter));
    assert_eq!(state.stage, 1);
    assert_eq!(state.mode, Mode::Exploring);
    assert!(state.inventory.is_empty());
}

#[test]
fn select_role_twice_is_ignored() {
    let catalog = two_stage_catalog();
    let rules = RulesConfig::default();
    let state = run(
        fresh(&catalog, &rules),
        &catalog,
        &rules,
        &[Event::SelectRole { role: Role::Reporter }],
    );
    let (state, output) = step(state, &catalog, &rules, Event::SelectRole { role: Role::Mage });
    assert_eq!(
        output.status,
        Status::Ignored {
            reason: IgnoreReason::RoleAlreadySelected
        }
    );
    assert_eq!(state.role, Some(Role::Reporter));
}

#[test]
fn base_item_granted_when_configured() {
    let catalog = two_stage_catalog();
    let rules = RulesConfig {
        grant_base_item: true,
        ..Default::default()
    };
    let (state, output) = step(
        fresh(&catalog, &rules),
        &catalog,
        &rules,
        Event::SelectRole { role: Role::Mage },
    );
    assert_eq!(state.inventory.len(), 1);
    assert_eq!(state.inventory[0].id, "BASE_MAGE");
    assert!(matches!(output.notices[0], Notice::ItemAcquired { .. }));
}

#[test]
fn events_before_role_selection_are_ignored() {
    let catalog = two_stage_catalog();
    let rules = RulesConfig::default();
    let initial = fresh(&catalog, &rules);

    for event in [
        UP,
        Event::CancelDialogue,
        Event::SelectChoice { index: 0 },
        Event::AdvanceStage,
    ] {
        let (state, output) = step(initial.clone(), &catalog, &rules, event);
        assert_eq!(
            output.status,
            Status::Ignored {
                reason: IgnoreReason::NoRole
            },
            "{event:?}"
        );
        assert_eq!(state, initial);
    }
}

#[test]
fn approaching_an_event_opens_dialogue() {
    let catalog = two_stage_catalog();
    let rules = RulesConfig::default();
    let state = run(
        fresh(&catalog, &rules),
        &catalog,
        &rules,
        &[Event::SelectRole { role: Role::Mage }, UP, UP],
    );
    // (50, 45) is exactly on the radius, which does not count
    assert!(state.interacting_with().is_none());

    let (state, output) = step(state, &catalog, &rules, UP);
    assert_eq!(state.position, Position::new(50.0, 42.5));
    assert_eq!(state.interacting_with().map(|e| e.ally.id.as_str()), Some("cx"));
    assert_eq!(
        output.notices,
        vec![Notice::DialogueOpened {
            ally: "cx".to_string()
        }]
    );
}

#[test]
fn moving_inside_radius_keeps_dialogue_open() {
    let catalog = two_stage_catalog();
    let rules = RulesConfig::default();
    let state = in_dialogue(&catalog, &rules);

    let (state, output) = step(state, &catalog, &rules, UP);
    assert!(state.interacting_with().is_some());
    assert!(!output.has_notices());
}

#[test]
fn leaving_and_returning_retriggers_without_cancel() {
    let catalog = two_stage_catalog();
    let rules = RulesConfig::default();
    let state = in_dialogue(&catalog, &rules);

    let (state, output) = step(state, &catalog, &rules, DOWN);
    assert!(state.interacting_with().is_none());
    assert_eq!(output.notices, vec![Notice::DialogueClosed]);

    let state = run(state, &catalog, &rules, &[UP]);
    assert!(state.interacting_with().is_some());
}

#[test]
fn cancel_suppresses_until_radius_is_left() {
    let catalog = two_stage_catalog();
    let rules = RulesConfig::default();
    let state = in_dialogue(&catalog, &rules);

    let (state, output) = step(state, &catalog, &rules, Event::CancelDialogue);
    assert!(output.is_applied());
    assert_eq!(state.mode, Mode::Exploring);
    assert!(state.suppressed.contains(&0));
    assert_eq!(state.position, Position::new(50.0, 42.5));

    // Still inside the radius: stays closed
    let state = run(state, &catalog, &rules, &[UP, DOWN]);
    assert!(state.interacting_with().is_none());
    assert!(state.suppressed.contains(&0));

    // Out to (50, 45): suppression released
    let state = run(state, &catalog, &rules, &[DOWN]);
    assert!(state.suppressed.is_empty());
    assert!(state.interacting_with().is_none());

    let state = run(state, &catalog, &rules, &[UP]);
    assert!(state.interacting_with().is_some());
}

#[test]
fn overlapping_cancelled_events_stay_suppressed_independently() {
    let catalog = catalog(vec![stage(
        1,
        vec![event("cx", 50.0, 40.0), event("sage", 50.0, 38.0)],
        vec![choice("listen", 0, 0, None, true)],
    )]);
    let rules = RulesConfig::default();

    // (50, 42.5) is inside both radii; cx comes first
    let state = in_dialogue(&catalog, &rules);
    assert_eq!(state.interacting_with().map(|e| e.ally.id.as_str()), Some("cx"));

    let state = run(state, &catalog, &rules, &[Event::CancelDialogue, UP]);
    assert_eq!(state.position, Position::new(50.0, 40.0));
    assert_eq!(state.interacting_with().map(|e| e.ally.id.as_str()), Some("sage"));

    let state = run(state, &catalog, &rules, &[Event::CancelDialogue]);
    assert_eq!(state.suppressed, BTreeSet::from([0, 1]));

    // Back to (50, 42.5): still inside cx's radius, so cx stays closed
    let state = run(state, &catalog, &rules, &[DOWN]);
    assert!(state.interacting_with().is_none());
    assert_eq!(state.suppressed.len(), 2);

    // (50, 45) is outside both radii
    let state = run(state, &catalog, &rules, &[DOWN]);
    assert!(state.suppressed.is_empty());

    let state = run(state, &catalog, &rules, &[UP]);
    assert_eq!(state.interacting_with().map(|e| e.ally.id.as_str()), Some("cx"));
}

#[test]
fn cancel_without_dialogue_is_ignored() {
    let catalog = two_stage_catalog();
    let rules = RulesConfig::default();
    let state = run(
        fresh(&catalog, &rules),
        &catalog,
        &rules,
        &[Event::SelectRole { role: Role::Mage }],
    );
    let (_, output) = step(state, &catalog, &rules, Event::CancelDialogue);
    assert_eq!(
        output.status,
        Status::Ignored {
            reason: IgnoreReason::NoDialogue
        }
    );
}

#[test]
fn choice_applies_impact_and_enters_resolving() {
    let catalog = two_stage_catalog();
    let rules = RulesConfig::default();
    let state = in_dialogue(&catalog, &rules);

    let (state, output) = step(state, &catalog, &rules, Event::SelectChoice { index: 0 });
    assert!(output.is_applied());
    assert_eq!(state.chaos.value(), 15);
    assert_eq!(state.risk.value(), 10);
    assert_eq!(state.inventory.len(), 1);
    assert_eq!(state.inventory[0].id, "FAQ_BUNDLE");
    assert_eq!(state.history.last().unwrap(), "✨ calm them done");
    assert_eq!(state.feedback(), Some("calm them done"));
    assert!(state.interacting_with().is_none());
    assert_eq!(state.position, rules.start_position);
    assert!(state.suppressed.is_empty());
    assert_eq!(
        output.notices,
        vec![Notice::ItemAcquired {
            item: item("FAQ_BUNDLE")
        }]
    );
}

#[test]
fn suboptimal_choice_gets_warning_marker() {
    let catalog = two_stage_catalog();
    let rules = RulesConfig::default();
    let state = in_dialogue(&catalog, &rules);

    let (state, output) = step(state, &catalog, &rules, Event::SelectChoice { index: 1 });
    assert_eq!(state.history.last().unwrap(), "⚠️ ignore them done");
    assert_eq!(state.chaos.value(), 50);
    assert_eq!(state.risk.value(), 20);
    assert!(!output.has_notices());
}

#[test]
fn unknown_choice_is_rejected_without_change() {
    let catalog = two_stage_catalog();
    let rules = RulesConfig::default();
    let state = in_dialogue(&catalog, &rules);

    let (after, output) = step(state.clone(), &catalog, &rules, Event::SelectChoice { index: 5 });
    assert_eq!(
        output.status,
        Status::Rejected {
            error: StepError::UnknownChoice {
                index: 5,
                available: 2
            }
        }
    );
    assert_eq!(after, state);
}

#[test]
fn choice_outside_dialogue_is_ignored() {
    let catalog = two_stage_catalog();
    let rules = RulesConfig::default();
    let state = run(
        fresh(&catalog, &rules),
        &catalog,
        &rules,
        &[Event::SelectRole { role: Role::Mage }],
    );
    let (after, output) = step(state.clone(), &catalog, &rules, Event::SelectChoice { index: 0 });
    assert_eq!(
        output.status,
        Status::Ignored {
            reason: IgnoreReason::NoDialogue
        }
    );
    assert_eq!(after, state);
}

#[test]
fn resolving_blocks_everything_but_advance() {
    let catalog = two_stage_catalog();
    let rules = RulesConfig::default();
    let state = run(
        in_dialogue(&catalog, &rules),
        &catalog,
        &rules,
        &[Event::SelectChoice { index: 0 }],
    );

    for event in [UP, Event::CancelDialogue, Event::SelectChoice { index: 0 }] {
        let (after, output) = step(state.clone(), &catalog, &rules, event);
        assert_eq!(
            output.status,
            Status::Ignored {
                reason: IgnoreReason::ShowingFeedback
            },
            "{event:?}"
        );
        assert_eq!(after, state);
    }
}

#[test]
fn advance_moves_to_next_stage_by_one() {
    let catalog = two_stage_catalog();
    let rules = RulesConfig::default();
    let state = run(
        in_dialogue(&catalog, &rules),
        &catalog,
        &rules,
        &[Event::SelectChoice { index: 0 }],
    );

    let (state, output) = step(state, &catalog, &rules, Event::AdvanceStage);
    assert_eq!(state.stage, 2);
    assert_eq!(state.mode, Mode::Exploring);
    assert_eq!(state.position, rules.start_position);
    assert_eq!(output.notices, vec![Notice::StageAdvanced { stage: 2 }]);

    // No feedback on screen any more
    let (state, output) = step(state, &catalog, &rules, Event::AdvanceStage);
    assert_eq!(
        output.status,
        Status::Ignored {
            reason: IgnoreReason::NotResolving
        }
    );
    assert_eq!(state.stage, 2);
}

#[test]
fn finishing_last_stage_ends_with_success() {
    let catalog = two_stage_catalog();
    let rules = RulesConfig::default();
    let state = run(
        in_dialogue(&catalog, &rules),
        &catalog,
        &rules,
        &[
            Event::SelectChoice { index: 0 },
            Event::AdvanceStage,
            UP,
            UP,
            UP,
            Event::SelectChoice { index: 0 },
        ],
    );
    assert_eq!(state.inventory.len(), 2);

    let (state, output) = step(state, &catalog, &rules, Event::AdvanceStage);
    let ending = state.ending().copied().unwrap();
    assert_eq!(ending.outcome, Outcome::Success);
    assert_eq!(ending.cause, TerminalCause::ScenarioComplete);
    assert_eq!(state.stage, 2);
    assert_eq!(output.notices, vec![Notice::GameOver { ending }]);
}

#[test]
fn meter_overflow_ends_game_at_advance_not_at_choice() {
    let catalog = catalog(vec![
        stage(
            1,
            vec![event("cx", 50.0, 40.0)],
            vec![choice("panic", 70, 0, None, false)],
        ),
        stage(
            2,
            vec![event("cx", 50.0, 40.0)],
            vec![choice("calm", -10, 0, None, true)],
        ),
    ]);
    let rules = RulesConfig::default();
    let state = run(
        in_dialogue(&catalog, &rules),
        &catalog,
        &rules,
        &[Event::SelectChoice { index: 0 }],
    );

    // 30 + 70 clamps to 100; still waiting on the feedback screen
    assert_eq!(state.chaos.value(), 100);
    assert!(!state.is_game_over());

    let (state, _) = step(state, &catalog, &rules, Event::AdvanceStage);
    let ending = state.ending().copied().unwrap();
    assert_eq!(ending.cause, TerminalCause::ChaosOverflow);
    assert_eq!(ending.outcome, Outcome::Failure);
    assert_eq!(state.stage, 1);
}

/// One stage with a single `delta` chaos choice, then a calm second stage
fn chaos_boundary_catalog(delta: i32) -> Catalog {
    catalog(vec![
        stage(
            1,
            vec![event("cx", 50.0, 40.0)],
            vec![choice("escalate", delta, 0, None, false)],
        ),
        stage(
            2,
            vec![event("cx", 50.0, 40.0)],
            vec![choice("calm", -10, 0, None, true)],
        ),
    ])
}

#[test]
fn chaos_reaching_ninety_ends_game_at_advance() {
    let catalog = chaos_boundary_catalog(70);
    let rules = RulesConfig {
        initial_chaos: 25,
        ..RulesConfig::default()
    };
    let state = run(
        in_dialogue(&catalog, &rules),
        &catalog,
        &rules,
        &[Event::SelectChoice { index: 0 }],
    );
    assert_eq!(state.chaos.value(), 90);
    assert!(!state.is_game_over());

    let (state, output) = step(state, &catalog, &rules, Event::AdvanceStage);
    let ending = state.ending().copied().unwrap();
    assert_eq!(ending.cause, TerminalCause::ChaosOverflow);
    assert_eq!(ending.outcome, Outcome::Failure);
    assert_eq!(state.stage, 1);
    assert_eq!(output.notices, vec![Notice::GameOver { ending }]);
}

#[test]
fn chaos_just_below_ninety_continues() {
    let catalog = chaos_boundary_catalog(64);
    let rules = RulesConfig {
        initial_chaos: 25,
        ..RulesConfig::default()
    };
    let state = run(
        in_dialogue(&catalog, &rules),
        &catalog,
        &rules,
        &[Event::SelectChoice { index: 0 }],
    );
    assert_eq!(state.chaos.value(), 89);

    let (state, output) = step(state, &catalog, &rules, Event::AdvanceStage);
    assert!(!state.is_game_over());
    assert_eq!(state.stage, 2);
    assert_eq!(state.mode, Mode::Exploring);
    assert_eq!(output.notices, vec![Notice::StageAdvanced { stage: 2 }]);
}

#[test]
fn risk_overflow_is_detected() {
    let catalog = catalog(vec![
        stage(
            1,
            vec![event("cx", 50.0, 40.0)],
            vec![choice("leak", 0, 80, None, false)],
        ),
        stage(
            2,
            vec![event("cx", 50.0, 40.0)],
            vec![choice("calm", -10, 0, None, true)],
        ),
    ]);
    let rules = RulesConfig::default();
    let state = run(
        in_dialogue(&catalog, &rules),
        &catalog,
        &rules,
        &[Event::SelectChoice { index: 0 }, Event::AdvanceStage],
    );
    assert_eq!(state.risk.value(), 90);
    assert_eq!(state.ending().unwrap().cause, TerminalCause::RiskOverflow);
}

#[test]
fn lingering_high_meter_is_a_pyrrhic_failure() {
    let catalog = catalog(vec![stage(
        1,
        vec![event("cx", 50.0, 40.0)],
        vec![choice("stumble", 55, 0, None, false)],
    )]);
    let rules = RulesConfig::default();
    let state = run(
        in_dialogue(&catalog, &rules),
        &catalog,
        &rules,
        &[Event::SelectChoice { index: 0 }, Event::AdvanceStage],
    );
    assert_eq!(state.chaos.value(), 85);
    let ending = state.ending().unwrap();
    assert_eq!(ending.cause, TerminalCause::ScenarioComplete);
    assert_eq!(ending.outcome, Outcome::Failure);
}

#[test]
fn terminal_state_ignores_everything_but_restart() {
    let catalog = catalog(vec![stage(
        1,
        vec![event("cx", 50.0, 40.0)],
        vec![choice("finish", 0, 0, None, true)],
    )]);
    let rules = RulesConfig::default();
    let state = run(
        in_dialogue(&catalog, &rules),
        &catalog,
        &rules,
        &[Event::SelectChoice { index: 0 }, Event::AdvanceStage],
    );
    assert!(state.is_game_over());

    for event in [
        UP,
        Event::CancelDialogue,
        Event::SelectChoice { index: 0 },
        Event::AdvanceStage,
        Event::SelectRole { role: Role::Mage },
    ] {
        let (after, output) = step(state.clone(), &catalog, &rules, event);
        assert_eq!(
            output.status,
            Status::Ignored {
                reason: IgnoreReason::GameOver
            },
            "{event:?}"
        );
        assert_eq!(after, state);
    }

    let (state, _) = step(state, &catalog, &rules, Event::Restart);
    assert!(!state.is_game_over());
    assert_eq!(state.mode, Mode::RoleSelect);
}

#[test]
fn restart_is_idempotent_and_resets_everything() {
    let catalog = two_stage_catalog();
    let rules = RulesConfig::default();
    let played = run(
        in_dialogue(&catalog, &rules),
        &catalog,
        &rules,
        &[Event::SelectChoice { index: 1 }, Event::AdvanceStage],
    );

    let once = step(played, &catalog, &rules, Event::Restart).0;
    let twice = step(once.clone(), &catalog, &rules, Event::Restart).0;
    assert_eq!(once, twice);

    assert_eq!(once.role, None);
    assert_eq!(once.stage, 0);
    assert_eq!(once.chaos.value(), 30);
    assert_eq!(once.risk.value(), 10);
    assert!(once.inventory.is_empty());
    assert_eq!(once.history, vec!["Again.".to_string()]);
    assert_eq!(once.position, rules.start_position);
    assert_eq!(once.mode, Mode::RoleSelect);
    assert!(once.suppressed.is_empty());
}

#[test]
fn duplicate_item_grants_are_kept_in_order() {
    let catalog = catalog(vec![
        stage(
            1,
            vec![event("cx", 50.0, 40.0)],
            vec![choice("a", 0, 0, Some(item("CUBE")), true)],
        ),
        stage(
            2,
            vec![event("cx", 50.0, 40.0)],
            vec![choice("b", 0, 0, Some(item("CUBE")), true)],
        ),
    ]);
    let rules = RulesConfig {
        grant_base_item: true,
        ..Default::default()
    };
    let state = run(
        in_dialogue(&catalog, &rules),
        &catalog,
        &rules,
        &[
            Event::SelectChoice { index: 0 },
            Event::AdvanceStage,
            UP,
            UP,
            UP,
            Event::SelectChoice { index: 0 },
        ],
    );
    let ids: Vec<_> = state.inventory.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["BASE_MAGE", "CUBE", "CUBE"]);
}

#[test]
fn meters_stay_in_range_for_extreme_deltas() {
    let rules = RulesConfig::default();
    for delta in [i32::MIN, -1000, -101, -31, 0, 69, 71, 1000, i32::MAX] {
        let catalog = catalog(vec![stage(
            1,
            vec![event("cx", 50.0, 40.0)],
            vec![choice("x", delta, delta, None, true)],
        )]);
        let state = run(
            in_dialogue(&catalog, &rules),
            &catalog,
            &rules,
            &[Event::SelectChoice { index: 0 }],
        );
        assert!(state.chaos.value() <= 100, "delta {delta}");
        assert!(state.risk.value() <= 100, "delta {delta}");
        let expected = (30i64 + i64::from(delta)).clamp(0, 100) as u8;
        assert_eq!(state.chaos.value(), expected, "delta {delta}");
    }
}

#[test]
fn movement_is_clamped_to_bounds() {
    let catalog = two_stage_catalog();
    let rules = RulesConfig::default();
    let mut state = run(
        fresh(&catalog, &rules),
        &catalog,
        &rules,
        &[Event::SelectRole { role: Role::Mage }],
    );
    for _ in 0..40 {
        state = step(
            state,
            &catalog,
            &rules,
            Event::Move {
                direction: Direction::Left,
            },
        )
        .0;
    }
    assert_eq!(state.position.x, rules.min_coord);
}
