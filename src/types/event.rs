//! Inbound events the presentation layer sends to the runtime

use crate::types::{Direction, Role};
use serde::{Deserialize, Serialize};

/// Input events accepted by [`crate::runtime::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Commit to a role and start stage 1
    SelectRole { role: Role },
    /// Move one step
    Move { direction: Direction },
    /// Dismiss the open dialogue
    CancelDialogue,
    /// Pick a choice by its index in the current stage/role choice list
    SelectChoice { index: usize },
    /// Leave the feedback screen for the next stage
    AdvanceStage,
    /// Throw the session away and return to role selection
    Restart,
}
