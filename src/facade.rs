//! Facade module providing a simple interface over the reducer
//!
//! [`Drill`] owns a catalog, the rules and the current session state, and
//! forwards events to [`runtime::step`].

use crate::rules::RulesConfig;
use crate::types::{
    Catalog, Direction, Event, Output, Role, SessionState, StageView, Status, StepError,
};
use crate::{catalog, runtime};

/// A drill session bound to one catalog
#[derive(Debug, Clone)]
pub struct Drill {
    catalog: Catalog,
    rules: RulesConfig,
    state: SessionState,
}

impl Drill {
    /// Start a session at role selection
    pub fn new(catalog: Catalog, rules: RulesConfig) -> Self {
        let state = SessionState::new(&rules, catalog.prologue.clone());
        Self {
            catalog,
            rules,
            state,
        }
    }

    /// Session over the built-in scenario with default rules
    pub fn builtin() -> Result<Self, catalog::CatalogError> {
        Ok(Self::new(catalog::builtin()?, RulesConfig::default()))
    }

    /// Apply one event
    ///
    /// Rejected events surface as `Err`; ignored events are `Ok` with an
    /// `Ignored` status.
    pub fn dispatch(&mut self, event: Event) -> Result<Output, StepError> {
        let (new_state, output) =
            runtime::step(self.state.clone(), &self.catalog, &self.rules, event);
        self.state = new_state;

        match output.status {
            Status::Rejected { error } => Err(error),
            _ => Ok(output),
        }
    }

    pub fn select_role(&mut self, role: Role) -> Result<Output, StepError> {
        self.dispatch(Event::SelectRole { role })
    }

    pub fn walk(&mut self, direction: Direction) -> Result<Output, StepError> {
        self.dispatch(Event::Move { direction })
    }

    pub fn cancel_dialogue(&mut self) -> Result<Output, StepError> {
        self.dispatch(Event::CancelDialogue)
    }

    pub fn choose(&mut self, index: usize) -> Result<Output, StepError> {
        self.dispatch(Event::SelectChoice { index })
    }

    pub fn advance(&mut self) -> Result<Output, StepError> {
        self.dispatch(Event::AdvanceStage)
    }

    pub fn restart(&mut self) -> Result<Output, StepError> {
        self.dispatch(Event::Restart)
    }

    /// Get the current state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Active stage for the active role, if a role is playing
    pub fn view(&self) -> Option<StageView<'_>> {
        self.catalog.view(&self.state)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }
}
