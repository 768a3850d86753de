//! Runtime state machine for drill sessions
//!
//! [`step`] is a pure reducer: it takes the current state and one event and
//! returns the next state plus an [`Output`]. Events that do not apply in the
//! current mode come back as `Status::Ignored`; a choice that does not exist
//! comes back as `Status::Rejected`. In both cases the state is unchanged.

use crate::rules::RulesConfig;
use crate::types::{
    Catalog, Direction, Ending, Event, IgnoreReason, Mode, Notice, Output, Role, SessionState,
    StepError, TerminalCause,
};

pub mod debug;
pub mod proximity;

#[cfg(test)]
mod tests;

/// History marker for an optimal choice
pub const BEST_MARKER: &str = "✨";
/// History marker for a suboptimal choice
pub const SUBOPTIMAL_MARKER: &str = "⚠️";

/// Apply one event to the session
pub fn step(
    mut state: SessionState,
    catalog: &Catalog,
    rules: &RulesConfig,
    event: Event,
) -> (SessionState, Output) {
    log::debug!(
        target: debug::ENGINE,
        "[Step] stage={} event={:?}",
        state.stage,
        event
    );

    let output = match event {
        Event::Restart => restart(&mut state, catalog, rules),
        _ if state.is_game_over() => Output::ignored(IgnoreReason::GameOver),
        Event::SelectRole { role } => select_role(&mut state, catalog, rules, role),
        Event::Move { direction } => move_player(&mut state, catalog, rules, direction),
        Event::CancelDialogue => cancel_dialogue(&mut state),
        Event::SelectChoice { index } => select_choice(&mut state, catalog, rules, index),
        Event::AdvanceStage => advance_stage(&mut state, catalog, rules),
    };

    if let crate::types::Status::Ignored { reason } = &output.status {
        log::debug!(target: debug::ENGINE, "[Step] ignored: {:?}", reason);
    }

    (state, output)
}

/// Role of a playing session, or the reason the event cannot apply
fn playing_role(state: &SessionState) -> Result<Role, IgnoreReason> {
    match (&state.mode, state.role) {
        (Mode::Terminal { .. }, _) => Err(IgnoreReason::GameOver),
        (Mode::RoleSelect, _) | (_, None) => Err(IgnoreReason::NoRole),
        (Mode::Resolving { .. }, _) => Err(IgnoreReason::ShowingFeedback),
        (_, Some(role)) => Ok(role),
    }
}

fn restart(state: &mut SessionState, catalog: &Catalog, rules: &RulesConfig) -> Output {
    *state = SessionState::new(rules, catalog.restart_prologue.clone());
    log::info!(target: debug::FLOW, "[Restart] back to role selection");
    Output::new()
}

fn select_role(
    state: &mut SessionState,
    catalog: &Catalog,
    rules: &RulesConfig,
    role: Role,
) -> Output {
    if state.mode != Mode::RoleSelect {
        return Output::ignored(IgnoreReason::RoleAlreadySelected);
    }
    if catalog.stage(1).is_none() {
        return Output::rejected(StepError::StageNotFound { stage: 1 });
    }

    let mut output = Output::new();
    state.role = Some(role);
    state.stage = 1;
    state.mode = Mode::Exploring;
    state.position = rules.start_position;
    state.suppressed.clear();

    if rules.grant_base_item {
        let item = catalog.role_info(role).base_item.clone();
        state.inventory.push(item.clone());
        output.add_notice(Notice::ItemAcquired { item });
    }

    log::info!(target: debug::FLOW, "[Role] {} selected, stage 1", role);
    output
}

fn move_player(
    state: &mut SessionState,
    catalog: &Catalog,
    rules: &RulesConfig,
    direction: Direction,
) -> Output {
    let role = match playing_role(state) {
        Ok(role) => role,
        Err(reason) => return Output::ignored(reason),
    };

    let mut output = Output::new();
    state.position = state
        .position
        .stepped(direction, rules.move_step, rules.min_coord, rules.max_coord);

    let events = catalog.events(state.stage, role);
    let detection = proximity::detect(
        state.position,
        events,
        &state.suppressed,
        rules.interaction_radius,
    );
    for index in &detection.released {
        state.suppressed.remove(index);
    }

    let current = match &state.mode {
        Mode::Dialogue { event, .. } => Some(*event),
        _ => None,
    };

    match (current, detection.active) {
        (Some(open), Some(found)) if open == found => {}
        (_, Some(found)) => {
            let dialogue = events[found].clone();
            output.add_notice(Notice::DialogueOpened {
                ally: dialogue.ally.id.clone(),
            });
            log::debug!(
                target: debug::PROXIMITY,
                "[Dialogue] opened event {} with '{}'",
                found,
                dialogue.ally.id
            );
            state.mode = Mode::Dialogue {
                event: found,
                dialogue,
            };
        }
        (Some(_), None) => {
            state.mode = Mode::Exploring;
            output.add_notice(Notice::DialogueClosed);
        }
        (None, None) => {}
    }

    output
}

fn cancel_dialogue(state: &mut SessionState) -> Output {
    if let Err(reason) = playing_role(state) {
        return Output::ignored(reason);
    }
    let Mode::Dialogue { event, .. } = state.mode else {
        return Output::ignored(IgnoreReason::NoDialogue);
    };

    state.suppressed.insert(event);
    state.mode = Mode::Exploring;
    log::debug!(target: debug::PROXIMITY, "[Dialogue] event {} dismissed", event);

    let mut output = Output::new();
    output.add_notice(Notice::DialogueClosed);
    output
}

fn select_choice(
    state: &mut SessionState,
    catalog: &Catalog,
    rules: &RulesConfig,
    index: usize,
) -> Output {
    let role = match playing_role(state) {
        Ok(role) => role,
        Err(reason) => return Output::ignored(reason),
    };
    if !matches!(state.mode, Mode::Dialogue { .. }) {
        return Output::ignored(IgnoreReason::NoDialogue);
    }

    let Some(stage) = catalog.stage(state.stage) else {
        return Output::rejected(StepError::StageNotFound { stage: state.stage });
    };
    let choices = stage.choices.get(role);
    let Some(choice) = choices.get(index) else {
        return Output::rejected(StepError::UnknownChoice {
            index,
            available: choices.len(),
        });
    };

    let mut output = Output::new();
    let impact = &choice.impact;
    let (chaos_before, risk_before) = (state.chaos, state.risk);
    state.chaos = state.chaos.apply(impact.chaos);
    state.risk = state.risk.apply(impact.risk);
    log::debug!(
        target: debug::METERS,
        "[Meters] chaos {} -> {} ({:+}), risk {} -> {} ({:+})",
        chaos_before,
        state.chaos,
        impact.chaos,
        risk_before,
        state.risk,
        impact.risk
    );

    if let Some(item) = &impact.item {
        state.inventory.push(item.clone());
        output.add_notice(Notice::ItemAcquired { item: item.clone() });
        log::debug!(target: debug::METERS, "[Inventory] +{}", item.id);
    }

    let marker = if choice.is_best {
        BEST_MARKER
    } else {
        SUBOPTIMAL_MARKER
    };
    state.history.push(format!("{} {}", marker, choice.feedback));

    state.mode = Mode::Resolving {
        feedback: choice.feedback.clone(),
    };
    state.suppressed.clear();
    state.position = rules.start_position;

    output
}

fn advance_stage(state: &mut SessionState, catalog: &Catalog, rules: &RulesConfig) -> Output {
    match state.mode {
        Mode::Resolving { .. } => {}
        Mode::RoleSelect => return Output::ignored(IgnoreReason::NoRole),
        _ => return Output::ignored(IgnoreReason::NotResolving),
    }

    let mut output = Output::new();
    let next = state.stage + 1;
    let threshold = rules.game_over_threshold;

    let cause = if state.chaos.value() >= threshold {
        Some(TerminalCause::ChaosOverflow)
    } else if state.risk.value() >= threshold {
        Some(TerminalCause::RiskOverflow)
    } else if next > catalog.stage_count() {
        Some(TerminalCause::ScenarioComplete)
    } else {
        None
    };

    match cause {
        Some(cause) => {
            let ending = Ending::classify(state.chaos, state.risk, cause, rules);
            log::info!(
                target: debug::FLOW,
                "[GameOver] {:?} ({:?}) at stage {} with chaos={} risk={}",
                ending.outcome,
                cause,
                state.stage,
                state.chaos,
                state.risk
            );
            state.mode = Mode::Terminal { ending };
            output.add_notice(Notice::GameOver { ending });
        }
        None => {
            state.stage = next;
            state.mode = Mode::Exploring;
            state.position = rules.start_position;
            state.suppressed.clear();
            log::info!(target: debug::FLOW, "[Stage] advanced to {}", next);
            output.add_notice(Notice::StageAdvanced { stage: next });
        }
    }

    output
}
