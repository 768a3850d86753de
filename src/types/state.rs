//! Session state representation

use crate::rules::RulesConfig;
use crate::types::{DialogueEvent, Item, Meter, Position, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Mutable state of one play session
///
/// The presentation layer only ever reads this; every mutation goes through
/// [`crate::runtime::step`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Committed role, `None` until a role is selected
    pub role: Option<Role>,
    /// Current stage id, 0 before role selection
    pub stage: u32,
    pub chaos: Meter,
    pub risk: Meter,
    /// Append-only, duplicates allowed
    pub inventory: Vec<Item>,
    /// Narrative log, oldest first
    pub history: Vec<String>,
    pub position: Position,
    pub mode: Mode,
    /// Indices of dismissed events; each stays closed until the player leaves its radius
    pub suppressed: BTreeSet<usize>,
}

impl SessionState {
    /// Fresh session waiting for role selection
    pub fn new(rules: &RulesConfig, prologue: impl Into<String>) -> Self {
        Self {
            role: None,
            stage: 0,
            chaos: Meter::new(rules.initial_chaos),
            risk: Meter::new(rules.initial_risk),
            inventory: Vec::new(),
            history: vec![prologue.into()],
            position: rules.start_position,
            mode: Mode::RoleSelect,
            suppressed: BTreeSet::new(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.mode, Mode::Terminal { .. })
    }

    /// The dialogue currently open, if any
    pub fn interacting_with(&self) -> Option<&DialogueEvent> {
        match &self.mode {
            Mode::Dialogue { dialogue, .. } => Some(dialogue),
            _ => None,
        }
    }

    /// Feedback of the last resolved choice while it is on screen
    pub fn feedback(&self) -> Option<&str> {
        match &self.mode {
            Mode::Resolving { feedback } => Some(feedback),
            _ => None,
        }
    }

    pub fn ending(&self) -> Option<&Ending> {
        match &self.mode {
            Mode::Terminal { ending } => Some(ending),
            _ => None,
        }
    }
}

/// Lifecycle position of the session
///
/// `Dialogue` and `Resolving` are separate variants, so an open dialogue and
/// on-screen feedback can never coexist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Mode {
    /// Waiting for a role
    RoleSelect,
    /// Walking the map, no dialogue open
    Exploring,
    /// A dialogue event is open
    Dialogue {
        /// Index into the stage's event list for the role
        event: usize,
        dialogue: DialogueEvent,
    },
    /// Feedback of the last choice is shown; only advancing is accepted
    Resolving { feedback: String },
    /// The session is over
    Terminal { ending: Ending },
}

/// How the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ending {
    pub outcome: Outcome,
    pub cause: TerminalCause,
}

impl Ending {
    /// Classify final meter values
    ///
    /// Success needs both meters strictly below the success threshold, which
    /// is lower than the game-over threshold: finishing every stage with a
    /// meter in between is still a failure.
    pub fn classify(chaos: Meter, risk: Meter, cause: TerminalCause, rules: &RulesConfig) -> Self {
        let outcome = if chaos.value() < rules.success_threshold
            && risk.value() < rules.success_threshold
        {
            Outcome::Success
        } else {
            Outcome::Failure
        };
        Self { outcome, cause }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failure,
}

/// What turned the session terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalCause {
    /// Every stage was played
    ScenarioComplete,
    /// Chaos reached the game-over threshold
    ChaosOverflow,
    /// Risk reached the game-over threshold
    RiskOverflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_uses_rule_defaults() {
        let rules = RulesConfig::default();
        let state = SessionState::new(&rules, "start");
        assert_eq!(state.chaos.value(), 30);
        assert_eq!(state.risk.value(), 10);
        assert_eq!(state.position, Position::new(50.0, 50.0));
        assert_eq!(state.history, vec!["start".to_string()]);
        assert_eq!(state.mode, Mode::RoleSelect);
        assert!(state.interacting_with().is_none());
        assert!(state.feedback().is_none());
    }

    #[test]
    fn classify_uses_lower_success_threshold() {
        let rules = RulesConfig::default();
        let pyrrhic = Ending::classify(
            Meter::new(85),
            Meter::new(10),
            TerminalCause::ScenarioComplete,
            &rules,
        );
        assert_eq!(pyrrhic.outcome, Outcome::Failure);

        let clean = Ending::classify(
            Meter::new(79),
            Meter::new(79),
            TerminalCause::ScenarioComplete,
            &rules,
        );
        assert!(clean.is_success());
    }
}
