//! Output from runtime execution

use crate::types::{Ending, Item};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of a single step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    pub status: Status,
    /// Things the presentation layer may want to announce
    pub notices: Vec<Notice>,
}

impl Output {
    /// Output of an event that was applied
    pub fn new() -> Self {
        Self {
            status: Status::Applied,
            notices: Vec::new(),
        }
    }

    pub fn ignored(reason: IgnoreReason) -> Self {
        Self {
            status: Status::Ignored { reason },
            notices: Vec::new(),
        }
    }

    pub fn rejected(error: StepError) -> Self {
        Self {
            status: Status::Rejected { error },
            notices: Vec::new(),
        }
    }

    pub fn add_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn is_applied(&self) -> bool {
        self.status == Status::Applied
    }

    pub fn has_notices(&self) -> bool {
        !self.notices.is_empty()
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the event changed the state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Status {
    Applied,
    /// The event does not apply in the current mode; state unchanged
    Ignored { reason: IgnoreReason },
    /// The event referenced something that does not exist; state unchanged
    Rejected { error: StepError },
}

/// Why an event was a no-op
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// No role selected yet
    NoRole,
    /// A role is already committed
    RoleAlreadySelected,
    /// The session is terminal
    GameOver,
    /// Feedback is on screen; only advancing is accepted
    ShowingFeedback,
    /// No dialogue is open
    NoDialogue,
    /// Advancing requires resolved feedback
    NotResolving,
}

/// Errors surfaced to the caller for references that cannot be resolved
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum StepError {
    #[error("Choice {index} does not exist, stage offers {available}")]
    UnknownChoice { index: usize, available: usize },

    #[error("Stage {stage} not found in catalog")]
    StageNotFound { stage: u32 },
}

/// Announcements emitted alongside a state change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "notice", rename_all = "snake_case")]
pub enum Notice {
    DialogueOpened { ally: String },
    DialogueClosed,
    ItemAcquired { item: Item },
    StageAdvanced { stage: u32 },
    GameOver { ending: Ending },
}
